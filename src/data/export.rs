use std::collections::HashMap;

use super::display::DisplayTable;
use super::model::InspectionRecord;

/// Bars in the cuisine chart.
pub const TOP_CUISINES: usize = 15;

/// Serialise a display table as UTF-8 CSV with a header row.
pub fn to_csv_text(table: &DisplayTable) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

// ---------------------------------------------------------------------------
// Aggregates for charts
// ---------------------------------------------------------------------------

/// Categorical columns that can be counted for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    Cuisine,
    Borough,
}

impl CategoryColumn {
    fn value<'r>(&self, rec: &'r InspectionRecord) -> Option<&'r str> {
        match self {
            CategoryColumn::Cuisine => rec.cuisine.as_deref(),
            CategoryColumn::Borough => rec.borough.as_deref(),
        }
    }
}

/// Count rows per category, most frequent first.
///
/// Rows without a value are skipped. Equal counts keep the order in which
/// the categories were first seen. `limit` keeps only the leading entries.
pub fn aggregate_counts<'r, I>(
    records: I,
    by: CategoryColumn,
    limit: Option<usize>,
) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'r InspectionRecord>,
{
    let mut index: HashMap<&'r str, usize> = HashMap::new();
    let mut counts: Vec<(&'r str, usize)> = Vec::new();

    for rec in records {
        let Some(category) = by.value(rec) else {
            continue;
        };
        match index.get(category) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(category, counts.len());
                counts.push((category, 1));
            }
        }
    }

    // `sort_by` is stable, so ties stay in encounter order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some(limit) = limit {
        counts.truncate(limit);
    }
    counts
        .into_iter()
        .map(|(category, n)| (category.to_string(), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::CriticalFlag;

    fn rec(cuisine: Option<&str>, borough: Option<&str>) -> InspectionRecord {
        InspectionRecord {
            restaurant_name: "X".into(),
            borough: borough.map(str::to_string),
            cuisine: cuisine.map(str::to_string),
            inspection_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            violation_description: None,
            critical_flag: CriticalFlag::Unrecorded,
            grade: "A".into(),
            score: None,
            zip_code: None,
        }
    }

    #[test]
    fn csv_has_header_and_quotes_when_needed() {
        let table = DisplayTable {
            headers: vec!["Restaurant Name".into(), "Violation Details".into()],
            rows: vec![
                vec!["Joe'S Pizza".into(), "Mice, roaches".into()],
                vec!["Plain".into(), "Said \"hi\"".into()],
            ],
        };
        let bytes = to_csv_text(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "Restaurant Name,Violation Details\n\
             Joe'S Pizza,\"Mice, roaches\"\n\
             Plain,\"Said \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn csv_output_is_deterministic() {
        let table = DisplayTable {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec!["1".into(), "".into()]],
        };
        let first = to_csv_text(&table).unwrap();
        assert_eq!(first, to_csv_text(&table).unwrap());
        assert_eq!(first, b"A,B\n1,\n");
    }

    #[test]
    fn borough_counts_are_unrestricted_and_skip_missing() {
        let rows = vec![
            rec(None, Some("Queens")),
            rec(None, Some("Bronx")),
            rec(None, Some("Bronx")),
            rec(None, None),
        ];
        let counts = aggregate_counts(&rows, CategoryColumn::Borough, None);
        assert_eq!(
            counts,
            vec![("Bronx".to_string(), 2), ("Queens".to_string(), 1)]
        );
    }
}
