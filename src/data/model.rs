use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// CriticalFlag – violation severity category
// ---------------------------------------------------------------------------

/// Severity category recorded with each violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CriticalFlag {
    Critical,
    NotCritical,
    NotApplicable,
    /// Blank cell or a value the dataset does not define.
    Unrecorded,
}

impl CriticalFlag {
    /// Interpret a raw `CRITICAL FLAG` cell.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Critical" => CriticalFlag::Critical,
            "Not Critical" => CriticalFlag::NotCritical,
            "Not Applicable" => CriticalFlag::NotApplicable,
            _ => CriticalFlag::Unrecorded,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CriticalFlag::Critical => "Critical",
            CriticalFlag::NotCritical => "Not Critical",
            CriticalFlag::NotApplicable => "Not Applicable",
            CriticalFlag::Unrecorded => "",
        }
    }
}

impl fmt::Display for CriticalFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// InspectionRecord – one row of the cleaned table
// ---------------------------------------------------------------------------

/// A single cleaned inspection row.
///
/// `restaurant_name` and `grade` are never empty and `inspection_date` is
/// always a real date; the loader drops rows that cannot satisfy this.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionRecord {
    /// Title-cased "doing business as" name.
    pub restaurant_name: String,
    pub borough: Option<String>,
    pub cuisine: Option<String>,
    pub inspection_date: NaiveDate,
    pub violation_description: Option<String>,
    pub critical_flag: CriticalFlag,
    pub grade: String,
    /// Violation points; lower is better.
    pub score: Option<i64>,
    pub zip_code: Option<i64>,
}

// ---------------------------------------------------------------------------
// InspectionTable – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed selection lists.
///
/// There is no mutable access to the rows once built.
#[derive(Debug, Clone, Default)]
pub struct InspectionTable {
    records: Vec<InspectionRecord>,
    names: Vec<String>,
    cuisines: Vec<String>,
    grades: Vec<String>,
}

impl InspectionTable {
    /// Build the distinct-value indices from the cleaned records.
    pub fn from_records(records: Vec<InspectionRecord>) -> Self {
        let mut names: BTreeSet<&str> = BTreeSet::new();
        let mut cuisines: BTreeSet<&str> = BTreeSet::new();
        let mut grades: BTreeSet<&str> = BTreeSet::new();

        for rec in &records {
            names.insert(&rec.restaurant_name);
            if let Some(c) = &rec.cuisine {
                cuisines.insert(c);
            }
            grades.insert(&rec.grade);
        }

        let names = names.into_iter().map(str::to_string).collect();
        let cuisines = cuisines.into_iter().map(str::to_string).collect();
        let grades = grades.into_iter().map(str::to_string).collect();
        InspectionTable {
            records,
            names,
            cuisines,
            grades,
        }
    }

    pub fn records(&self) -> &[InspectionRecord] {
        &self.records
    }

    /// Sorted distinct restaurant names, for the name picker.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Sorted distinct cuisine descriptions.
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    /// Sorted distinct grades.
    pub fn grades(&self) -> &[String] {
        &self.grades
    }

    /// "A" when the dataset has it, otherwise the first grade in sort order.
    pub fn default_grade(&self) -> Option<&str> {
        self.grades
            .iter()
            .find(|g| g.as_str() == "A")
            .or_else(|| self.grades.first())
            .map(String::as_str)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, cuisine: Option<&str>, grade: &str) -> InspectionRecord {
        InspectionRecord {
            restaurant_name: name.to_string(),
            borough: None,
            cuisine: cuisine.map(str::to_string),
            inspection_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            violation_description: None,
            critical_flag: CriticalFlag::Unrecorded,
            grade: grade.to_string(),
            score: None,
            zip_code: None,
        }
    }

    #[test]
    fn distinct_values_are_sorted_and_deduplicated() {
        let table = InspectionTable::from_records(vec![
            record("A", Some("Thai"), "B"),
            record("B", Some("Pizza"), "A"),
            record("C", None, "B"),
            record("D", Some("Thai"), "Z"),
        ]);
        assert_eq!(table.cuisines(), ["Pizza", "Thai"]);
        assert_eq!(table.grades(), ["A", "B", "Z"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn restaurant_names_are_sorted_and_deduplicated() {
        let table = InspectionTable::from_records(vec![
            record("Thai House", Some("Thai"), "A"),
            record("Joe'S Pizza", Some("Pizza"), "A"),
            record("Thai House", Some("Thai"), "B"),
            record("Corner Deli", None, "A"),
        ]);
        assert_eq!(table.names(), ["Corner Deli", "Joe'S Pizza", "Thai House"]);
        assert!(InspectionTable::default().names().is_empty());
    }

    #[test]
    fn default_grade_prefers_a() {
        let table = InspectionTable::from_records(vec![
            record("A", None, "C"),
            record("B", None, "A"),
        ]);
        assert_eq!(table.default_grade(), Some("A"));

        let table = InspectionTable::from_records(vec![
            record("A", None, "P"),
            record("B", None, "C"),
        ]);
        assert_eq!(table.default_grade(), Some("C"));

        assert_eq!(InspectionTable::default().default_grade(), None);
    }

    #[test]
    fn critical_flag_parses_known_values() {
        assert_eq!(CriticalFlag::parse("Critical"), CriticalFlag::Critical);
        assert_eq!(CriticalFlag::parse(" Not Critical "), CriticalFlag::NotCritical);
        assert_eq!(CriticalFlag::parse("Not Applicable"), CriticalFlag::NotApplicable);
        assert_eq!(CriticalFlag::parse(""), CriticalFlag::Unrecorded);
        assert_eq!(CriticalFlag::parse("Maybe"), CriticalFlag::Unrecorded);
        assert_eq!(CriticalFlag::NotCritical.to_string(), "Not Critical");
    }
}
