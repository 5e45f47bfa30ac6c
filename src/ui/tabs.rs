use eframe::egui::{self, RichText, ScrollArea, TextEdit, Ui};

use inspection_explorer::data::filter::CriticalFilter;
use inspection_explorer::data::loader::DATASET_URL;

use super::panels::save_csv_dialog;
use super::table::result_table;
use crate::color::{grade_color, WARNING_AMBER};
use crate::state::{AppState, Outcome, Tab};

/// Render the tab strip.
pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui) {
    ui.heading("📊 NYC Restaurant Inspection Explorer");
    ui.add_space(8.0);

    ui.strong("Problem statement");
    ui.label("Explore NYC restaurant inspection results to make safer dining decisions.");
    ui.add_space(8.0);

    ui.strong("Dataset source");
    ui.hyperlink_to(
        "NYC Open Data – Restaurant Inspection Results",
        "https://data.cityofnewyork.us/Health/Restaurant-Inspection-Results/43nn-pn8j",
    );
    ui.label(RichText::new(DATASET_URL).small().weak());
    ui.add_space(8.0);

    ui.strong("Features");
    ui.label("• Search by restaurant name and ZIP code");
    ui.label("• Explore by cuisine type, inspection grade and critical flag");
    ui.label("• See the latest inspection scores, grades and violations");
    ui.label("• Download any result table as CSV");
}

// ---------------------------------------------------------------------------
// Search by name / ZIP
// ---------------------------------------------------------------------------

/// Cap on entries listed by the name picker; typing narrows the list.
const NAME_PICKER_ROWS: usize = 200;

pub fn search(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Search by Restaurant Name & ZIP Code");

    let table = state.table.clone();
    egui::Grid::new("search_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Restaurant name");
            ui.horizontal(|ui: &mut Ui| {
                ui.add(TextEdit::singleline(&mut state.name_input).hint_text("e.g. Joe's Pizza"));
                if let Some(table) = &table {
                    name_picker(ui, table.names(), &mut state.name_input);
                }
            });
            ui.end_row();

            ui.label("ZIP code (optional)");
            ui.add(TextEdit::singleline(&mut state.zip_input).hint_text("e.g. 10001"));
            ui.end_row();
        });

    if ui.button("Search").clicked() {
        state.run_search();
    }
    ui.add_space(6.0);

    let mut saved = None;
    match &state.search_outcome {
        None => {}
        Some(Outcome::Rows(view)) => {
            ui.label(
                RichText::new(format!(
                    "Top {} results for '{}'",
                    view.rows.len(),
                    state.name_input.trim()
                ))
                .strong(),
            );
            result_table(ui, "search_results", &view.rows);
            if ui.button("Download results as CSV").clicked() {
                saved = save_csv_dialog(&view.csv, "filtered_results.csv");
            }
            if let Some(history) = &view.history {
                egui::CollapsingHeader::new(format!(
                    "Historical violation records ({})",
                    history.len()
                ))
                .id_salt("search_history")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    result_table(ui, "search_history_table", history);
                });
            }
        }
        Some(Outcome::NoMatches) => {
            ui.colored_label(WARNING_AMBER, "No matching records found.");
        }
        Some(Outcome::Rejected(e)) => {
            ui.colored_label(WARNING_AMBER, e.to_string());
        }
    }
    if saved.is_some() {
        state.status = saved;
    }
}

/// Drop-down of known restaurant names containing the typed text. "(none)"
/// clears the selection.
fn name_picker(ui: &mut Ui, names: &[String], name_input: &mut String) {
    let needle = name_input.trim().to_lowercase();
    egui::ComboBox::from_id_salt("restaurant_name")
        .selected_text("Pick a name")
        .width(220.0)
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical().max_height(300.0).show(ui, |ui: &mut Ui| {
                if ui.selectable_label(name_input.is_empty(), "(none)").clicked() {
                    name_input.clear();
                }
                let matching = names
                    .iter()
                    .filter(|n| needle.is_empty() || n.to_lowercase().contains(&needle));
                for name in matching.take(NAME_PICKER_ROWS) {
                    if ui.selectable_label(*name_input == *name, name).clicked() {
                        *name_input = name.clone();
                    }
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Explore by cuisine / grade / critical flag
// ---------------------------------------------------------------------------

pub fn explore(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🍽 Filter by Cuisine, Grade & Critical Flag");

    let Some(table) = state.table.clone() else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Cuisine type");
        let current = state.selection.cuisine.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("cuisine")
            .selected_text(&current)
            .width(240.0)
            .show_ui(ui, |ui: &mut Ui| {
                ScrollArea::vertical().max_height(300.0).show(ui, |ui: &mut Ui| {
                    for cuisine in table.cuisines() {
                        if ui.selectable_label(current == *cuisine, cuisine).clicked() {
                            state.selection.cuisine = Some(cuisine.clone());
                        }
                    }
                });
            });
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Inspection grade");
        for grade in table.grades() {
            let text = RichText::new(grade).color(grade_color(grade));
            ui.radio_value(&mut state.selection.grade, Some(grade.clone()), text);
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Critical flag");
        for filter in CriticalFilter::ALL {
            ui.radio_value(&mut state.selection.critical, filter, filter.label());
        }
    });

    state.refresh_browse();
    ui.add_space(6.0);

    let mut saved = None;
    match &state.browse_outcome {
        None => {}
        Some(Outcome::Rows(view)) => {
            ui.label(
                RichText::new(format!(
                    "Top {} restaurants with grade '{}' for '{}' cuisine",
                    view.rows.len(),
                    state.selection.grade.as_deref().unwrap_or_default(),
                    state.selection.cuisine.as_deref().unwrap_or_default(),
                ))
                .strong(),
            );
            result_table(ui, "browse_results", &view.rows);
            if ui.button("Download filtered cuisine results").clicked() {
                saved = save_csv_dialog(&view.csv, "cuisine_filtered.csv");
            }
        }
        Some(Outcome::NoMatches) => {
            ui.colored_label(WARNING_AMBER, "No records found for selected filters.");
        }
        Some(Outcome::Rejected(e)) => {
            ui.colored_label(WARNING_AMBER, e.to_string());
        }
    }
    if saved.is_some() {
        state.status = saved;
    }
}
