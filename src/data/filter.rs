use std::cmp::Ordering;
use std::num::IntErrorKind;

use super::error::QueryError;
use super::model::{CriticalFlag, InspectionRecord, InspectionTable};

/// Default number of rows returned by both modes.
pub const DEFAULT_LIMIT: usize = 20;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How the `name` criterion is compared against `restaurant_name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatch {
    /// Case-insensitive literal substring.
    #[default]
    Substring,
    /// Case-insensitive equality.
    Exact,
}

/// Tunables for the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Row cap for name/ZIP search.
    pub search_limit: usize,
    /// Row cap for cuisine/grade/critical browsing.
    pub browse_limit: usize,
    pub name_match: NameMatch,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_LIMIT,
            browse_limit: DEFAULT_LIMIT,
            name_match: NameMatch::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Which critical-flag rows to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CriticalFilter {
    #[default]
    All,
    Critical,
    NotCritical,
}

impl CriticalFilter {
    pub const ALL: [CriticalFilter; 3] = [
        CriticalFilter::All,
        CriticalFilter::Critical,
        CriticalFilter::NotCritical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CriticalFilter::All => "All",
            CriticalFilter::Critical => "Critical",
            CriticalFilter::NotCritical => "Not Critical",
        }
    }

    fn accepts(&self, flag: CriticalFlag) -> bool {
        match self {
            CriticalFilter::All => true,
            CriticalFilter::Critical => flag == CriticalFlag::Critical,
            CriticalFilter::NotCritical => flag == CriticalFlag::NotCritical,
        }
    }
}

/// Optional, AND-ed query options. Blank text counts as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub name: Option<String>,
    /// Raw user text; validated as an integer before filtering.
    pub zip_code: Option<String>,
    pub cuisine: Option<String>,
    pub grade: Option<String>,
    pub critical: CriticalFilter,
}

/// Criteria after input validation, borrowed from the caller's [`Criteria`].
struct Prepared<'c> {
    name: Option<String>,
    name_match: NameMatch,
    zip_code: Option<ZipKey>,
    cuisine: Option<&'c str>,
    grade: Option<&'c str>,
    critical: CriticalFilter,
}

/// A validated ZIP criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZipKey {
    Code(i64),
    /// A well-formed integer too large to be any stored ZIP code.
    OutOfRange,
}

impl Criteria {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_zip_code(mut self, zip: impl Into<String>) -> Self {
        self.zip_code = Some(zip.into());
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_critical(mut self, critical: CriticalFilter) -> Self {
        self.critical = critical;
        self
    }

    /// Whether a name or ZIP code was supplied (required for search mode).
    pub fn has_search_key(&self) -> bool {
        supplied(&self.name).is_some() || supplied(&self.zip_code).is_some()
    }

    fn prepare(&self, name_match: NameMatch) -> Result<Prepared<'_>, QueryError> {
        let zip_code = supplied(&self.zip_code).map(parse_zip).transpose()?;

        Ok(Prepared {
            name: supplied(&self.name).map(str::to_lowercase),
            name_match,
            zip_code,
            cuisine: supplied(&self.cuisine),
            grade: supplied(&self.grade),
            critical: self.critical,
        })
    }
}

fn parse_zip(raw: &str) -> Result<ZipKey, QueryError> {
    match raw.parse::<i64>() {
        Ok(code) => Ok(ZipKey::Code(code)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(ZipKey::OutOfRange)
        }
        Err(_) => Err(QueryError::InvalidInput {
            field: "ZIP code",
            value: raw.to_string(),
        }),
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Prepared<'_> {
    fn matches(&self, rec: &InspectionRecord) -> bool {
        if let Some(needle) = &self.name {
            let hay = rec.restaurant_name.to_lowercase();
            let hit = match self.name_match {
                NameMatch::Substring => hay.contains(needle.as_str()),
                NameMatch::Exact => hay == *needle,
            };
            if !hit {
                return false;
            }
        }
        match self.zip_code {
            Some(ZipKey::Code(zip)) if rec.zip_code != Some(zip) => return false,
            Some(ZipKey::OutOfRange) => return false,
            _ => {}
        }
        if let Some(cuisine) = self.cuisine {
            if rec.cuisine.as_deref() != Some(cuisine) {
                return false;
            }
        }
        if let Some(grade) = self.grade {
            if rec.grade != grade {
                return false;
            }
        }
        self.critical.accepts(rec.critical_flag)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Every row passing `criteria`, in table order.
///
/// Fails with [`QueryError::InvalidInput`] before scanning when the ZIP code
/// is not an integer.
pub fn filter_records<'t>(
    table: &'t InspectionTable,
    criteria: &Criteria,
    config: &FilterConfig,
) -> Result<Vec<&'t InspectionRecord>, QueryError> {
    let prepared = criteria.prepare(config.name_match)?;
    Ok(table
        .records()
        .iter()
        .filter(|rec| prepared.matches(rec))
        .collect())
}

/// Name/ZIP search: most recent inspections first, capped at
/// `config.search_limit`.
pub fn search<'t>(
    table: &'t InspectionTable,
    criteria: &Criteria,
    config: &FilterConfig,
) -> Result<Vec<&'t InspectionRecord>, QueryError> {
    let mut rows = search_history(table, criteria, config)?;
    rows.truncate(config.search_limit);
    Ok(rows)
}

/// All rows a name/ZIP search matches, most recent first, uncapped.
pub fn search_history<'t>(
    table: &'t InspectionTable,
    criteria: &Criteria,
    config: &FilterConfig,
) -> Result<Vec<&'t InspectionRecord>, QueryError> {
    if !criteria.has_search_key() {
        return Err(QueryError::MissingSelection);
    }
    let mut rows = filter_records(table, criteria, config)?;
    rows.sort_by(|a, b| b.inspection_date.cmp(&a.inspection_date));
    Ok(rows)
}

/// Cuisine/grade/critical browsing: lowest score first (missing scores
/// last), capped at `config.browse_limit`.
pub fn browse<'t>(
    table: &'t InspectionTable,
    criteria: &Criteria,
    config: &FilterConfig,
) -> Result<Vec<&'t InspectionRecord>, QueryError> {
    let mut rows = filter_records(table, criteria, config)?;
    rows.sort_by(|a, b| score_order(a.score, b.score));
    rows.truncate(config.browse_limit);
    Ok(rows)
}

fn score_order(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn rec(name: &str, date: (i32, u32, u32), score: Option<i64>) -> InspectionRecord {
        InspectionRecord {
            restaurant_name: name.to_string(),
            borough: Some("Manhattan".into()),
            cuisine: Some("Pizza".into()),
            inspection_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            violation_description: None,
            critical_flag: CriticalFlag::Critical,
            grade: "A".into(),
            score,
            zip_code: Some(10001),
        }
    }

    #[test]
    fn blank_criteria_are_ignored() {
        let c = Criteria::default().with_name("   ").with_zip_code("");
        assert!(!c.has_search_key());
        let table = InspectionTable::from_records(vec![rec("Joe", (2024, 1, 1), None)]);
        assert_eq!(
            search(&table, &c, &FilterConfig::default()),
            Err(QueryError::MissingSelection)
        );
    }

    #[test]
    fn exact_name_mode() {
        let table = InspectionTable::from_records(vec![
            rec("Joe'S Pizza", (2024, 1, 1), None),
            rec("Joe'S Pizza Express", (2024, 1, 2), None),
        ]);
        let config = FilterConfig {
            name_match: NameMatch::Exact,
            ..FilterConfig::default()
        };
        let rows = search(&table, &Criteria::default().with_name("JOE'S PIZZA"), &config).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].restaurant_name, "Joe'S Pizza");

        let rows = search(
            &table,
            &Criteria::default().with_name("joe"),
            &FilterConfig::default(),
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn zip_is_trimmed_before_parsing() {
        let table = InspectionTable::from_records(vec![rec("Joe", (2024, 1, 1), None)]);
        let rows = search(
            &table,
            &Criteria::default().with_zip_code(" 10001 "),
            &FilterConfig::default(),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn oversized_zip_matches_nothing() {
        let table = InspectionTable::from_records(vec![rec("Joe", (2024, 1, 1), None)]);
        let config = FilterConfig::default();
        for zip in ["99999999999999999999", "-99999999999999999999"] {
            let rows = search(&table, &Criteria::default().with_zip_code(zip), &config).unwrap();
            assert!(rows.is_empty());
        }
        assert_eq!(
            search(&table, &Criteria::default().with_zip_code("1e30"), &config),
            Err(QueryError::InvalidInput {
                field: "ZIP code",
                value: "1e30".into()
            })
        );
    }

    #[test]
    fn critical_filter() {
        let mut not_critical = rec("B", (2024, 1, 1), Some(3));
        not_critical.critical_flag = CriticalFlag::NotCritical;
        let mut blank = rec("C", (2024, 1, 1), Some(1));
        blank.critical_flag = CriticalFlag::Unrecorded;
        let table =
            InspectionTable::from_records(vec![rec("A", (2024, 1, 1), Some(5)), not_critical, blank]);
        let config = FilterConfig::default();

        let all = browse(&table, &Criteria::default(), &config).unwrap();
        assert_eq!(all.len(), 3);

        let crit = browse(
            &table,
            &Criteria::default().with_critical(CriticalFilter::Critical),
            &config,
        )
        .unwrap();
        assert_eq!(crit.len(), 1);
        assert_eq!(crit[0].restaurant_name, "A");

        let not = browse(
            &table,
            &Criteria::default().with_critical(CriticalFilter::NotCritical),
            &config,
        )
        .unwrap();
        assert_eq!(not.len(), 1);
        assert_eq!(not[0].restaurant_name, "B");
    }

    #[test]
    fn missing_scores_sort_last() {
        let table = InspectionTable::from_records(vec![
            rec("none", (2024, 1, 1), None),
            rec("ten", (2024, 1, 1), Some(10)),
            rec("zero", (2024, 1, 1), Some(0)),
        ]);
        let rows = browse(&table, &Criteria::default(), &FilterConfig::default()).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.restaurant_name.as_str()).collect();
        assert_eq!(names, ["zero", "ten", "none"]);
    }

    #[test]
    fn history_is_uncapped() {
        let records = (1..=30)
            .map(|d| rec("Joe", (2023, 1 + (d % 12), 1 + d % 28), None))
            .collect();
        let table = InspectionTable::from_records(records);
        let criteria = Criteria::default().with_name("joe");
        let config = FilterConfig::default();
        assert_eq!(search(&table, &criteria, &config).unwrap().len(), 20);
        assert_eq!(search_history(&table, &criteria, &config).unwrap().len(), 30);
    }
}
