use std::sync::Arc;

use inspection_explorer::data::display::{to_display, DisplayTable};
use inspection_explorer::data::export::{aggregate_counts, to_csv_text, CategoryColumn, TOP_CUISINES};
use inspection_explorer::data::filter::{browse, search_history, Criteria, CriticalFilter, FilterConfig};
use inspection_explorer::data::model::{InspectionRecord, InspectionTable};
use inspection_explorer::{LoadError, QueryError};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Search,
    Explore,
    Insights,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Search, Tab::Explore, Tab::Insights];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "📘 Project Overview",
            Tab::Search => "🔍 Search Restaurants",
            Tab::Explore => "🍽 Explore by Cuisine & Grade",
            Tab::Insights => "📊 Visual Insights",
        }
    }
}

/// A rendered result set ready for the table widget and the download button.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub rows: DisplayTable,
    /// Every match, newest first (search only).
    pub history: Option<DisplayTable>,
    pub csv: Vec<u8>,
}

/// What the last search or browse produced.
#[derive(Debug, Clone)]
pub enum Outcome {
    Rows(ResultView),
    NoMatches,
    Rejected(QueryError),
}

/// The cuisine/grade/critical radio and combo selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseSelection {
    pub cuisine: Option<String>,
    pub grade: Option<String>,
    pub critical: CriticalFilter,
}

impl BrowseSelection {
    fn criteria(&self) -> Criteria {
        Criteria {
            cuisine: self.cuisine.clone(),
            grade: self.grade.clone(),
            critical: self.critical,
            ..Criteria::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Cleaned dataset (None when loading failed).
    pub table: Option<Arc<InspectionTable>>,

    /// Fatal load error shown instead of the dashboard.
    pub load_error: Option<String>,

    pub config: FilterConfig,
    pub tab: Tab,

    pub name_input: String,
    pub zip_input: String,
    pub search_outcome: Option<Outcome>,

    pub selection: BrowseSelection,
    /// Selection the cached `browse_outcome` was computed for.
    browsed: Option<BrowseSelection>,
    pub browse_outcome: Option<Outcome>,

    pub cuisine_counts: Vec<(String, usize)>,
    pub borough_counts: Vec<(String, usize)>,
    pub borough_colors: Option<ColorMap>,

    /// Status / error message shown in the top bar.
    pub status: Option<Status>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            load_error: None,
            config: FilterConfig::default(),
            tab: Tab::default(),
            name_input: String::new(),
            zip_input: String::new(),
            search_outcome: None,
            selection: BrowseSelection::default(),
            browsed: None,
            browse_outcome: None,
            cuisine_counts: Vec::new(),
            borough_counts: Vec::new(),
            borough_colors: None,
            status: None,
        }
    }
}

impl AppState {
    /// State for the result of the startup load.
    pub fn from_load(result: Result<Arc<InspectionTable>, LoadError>) -> Self {
        let mut state = Self::default();
        match result {
            Ok(table) => state.set_table(table),
            Err(e) => {
                log::error!("Failed to load inspection data: {e}");
                state.load_error = Some(e.to_string());
            }
        }
        state
    }

    /// Ingest a newly loaded table: reset queries, pick default selections
    /// and precompute the chart aggregates.
    pub fn set_table(&mut self, table: Arc<InspectionTable>) {
        self.selection = BrowseSelection {
            cuisine: table.cuisines().first().cloned(),
            grade: table.default_grade().map(str::to_string),
            critical: CriticalFilter::All,
        };
        self.browsed = None;
        self.browse_outcome = None;
        self.search_outcome = None;

        self.cuisine_counts =
            aggregate_counts(table.records(), CategoryColumn::Cuisine, Some(TOP_CUISINES));
        self.borough_counts = aggregate_counts(table.records(), CategoryColumn::Borough, None);
        self.borough_colors = Some(ColorMap::new(
            self.borough_counts.iter().map(|(b, _)| b.as_str()),
        ));

        self.table = Some(table);
        self.load_error = None;
    }

    /// Run the name/ZIP search for the current inputs.
    pub fn run_search(&mut self) {
        let Some(table) = self.table.clone() else {
            return;
        };
        let criteria = Criteria {
            name: Some(self.name_input.clone()),
            zip_code: Some(self.zip_input.clone()),
            ..Criteria::default()
        };

        let outcome = match search_history(&table, &criteria, &self.config) {
            Ok(history) if history.is_empty() => Outcome::NoMatches,
            Ok(history) => {
                let top = &history[..history.len().min(self.config.search_limit)];
                let mut view = self.result_view(top);
                view.history = Some(to_display(&history));
                log::info!("Search returned {} of {} matching rows", top.len(), history.len());
                Outcome::Rows(view)
            }
            Err(e) => {
                log::debug!("Search rejected: {e}");
                Outcome::Rejected(e)
            }
        };
        self.search_outcome = Some(outcome);
    }

    /// Recompute the browse results if the selection changed.
    pub fn refresh_browse(&mut self) {
        if self.browsed.as_ref() == Some(&self.selection) {
            return;
        }
        let Some(table) = self.table.clone() else {
            return;
        };
        let criteria = self.selection.criteria();
        let outcome = match browse(&table, &criteria, &self.config) {
            Ok(rows) if rows.is_empty() => Outcome::NoMatches,
            Ok(rows) => Outcome::Rows(self.result_view(&rows)),
            Err(e) => Outcome::Rejected(e),
        };
        self.browse_outcome = Some(outcome);
        self.browsed = Some(self.selection.clone());
    }

    fn result_view(&mut self, rows: &[&InspectionRecord]) -> ResultView {
        let display = to_display(rows);
        let csv = match to_csv_text(&display) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Failed to serialise results: {e}");
                self.status = Some(Status::Error(format!("CSV export unavailable: {e}")));
                Vec::new()
            }
        };
        ResultView {
            rows: display,
            history: None,
            csv,
        }
    }
}
