use super::model::InspectionRecord;

// ---------------------------------------------------------------------------
// Column – the projected fields and their labels
// ---------------------------------------------------------------------------

/// The projected columns of an [`InspectionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    RestaurantName,
    Borough,
    Cuisine,
    InspectionDate,
    ViolationDescription,
    CriticalFlag,
    Grade,
    Score,
    ZipCode,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::RestaurantName,
        Column::Borough,
        Column::Cuisine,
        Column::InspectionDate,
        Column::ViolationDescription,
        Column::CriticalFlag,
        Column::Grade,
        Column::Score,
        Column::ZipCode,
    ];

    /// Header used by the upstream export.
    pub fn source_header(&self) -> &'static str {
        match self {
            Column::RestaurantName => "DBA",
            Column::Borough => "BORO",
            Column::Cuisine => "CUISINE DESCRIPTION",
            Column::InspectionDate => "INSPECTION DATE",
            Column::ViolationDescription => "VIOLATION DESCRIPTION",
            Column::CriticalFlag => "CRITICAL FLAG",
            Column::Grade => "GRADE",
            Column::Score => "SCORE",
            Column::ZipCode => "ZIPCODE",
        }
    }

    /// Human-readable header.
    pub fn label(&self) -> &'static str {
        match self {
            Column::RestaurantName => "Restaurant Name",
            Column::Borough => "Borough",
            Column::Cuisine => "Cuisine",
            Column::InspectionDate => "Inspection Date",
            Column::ViolationDescription => "Violation Details",
            Column::CriticalFlag => "Critical Issue",
            Column::Grade => "Grade",
            Column::Score => "Score",
            Column::ZipCode => "ZIP Code",
        }
    }

    /// Render this column of `rec` as display text. Missing values are empty.
    pub fn cell(&self, rec: &InspectionRecord) -> String {
        match self {
            Column::RestaurantName => rec.restaurant_name.clone(),
            Column::Borough => rec.borough.clone().unwrap_or_default(),
            Column::Cuisine => rec.cuisine.clone().unwrap_or_default(),
            Column::InspectionDate => rec.inspection_date.format("%Y-%m-%d").to_string(),
            Column::ViolationDescription => rec.violation_description.clone().unwrap_or_default(),
            Column::CriticalFlag => rec.critical_flag.to_string(),
            Column::Grade => rec.grade.clone(),
            Column::Score => rec.score.map(|s| s.to_string()).unwrap_or_default(),
            Column::ZipCode => rec.zip_code.map(|z| z.to_string()).unwrap_or_default(),
        }
    }
}

/// Columns shown for search and browse results, in order.
pub const DISPLAY_COLUMNS: [Column; 7] = [
    Column::RestaurantName,
    Column::Borough,
    Column::InspectionDate,
    Column::Grade,
    Column::Score,
    Column::CriticalFlag,
    Column::ViolationDescription,
];

/// Map an upstream header to its label. Anything else, including a header
/// that is already a label, is returned unchanged.
pub fn display_label(header: &str) -> &str {
    Column::ALL
        .iter()
        .find(|c| c.source_header() == header)
        .map(Column::label)
        .unwrap_or(header)
}

// ---------------------------------------------------------------------------
// DisplayTable
// ---------------------------------------------------------------------------

/// Rows rendered to text under human-readable headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    /// Replace any upstream headers with their labels.
    pub fn relabel(mut self) -> Self {
        for h in &mut self.headers {
            *h = display_label(h.as_str()).to_string();
        }
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project `rows` onto [`DISPLAY_COLUMNS`].
pub fn to_display(rows: &[&InspectionRecord]) -> DisplayTable {
    to_display_with(rows, &DISPLAY_COLUMNS)
}

/// Project `rows` onto `columns`, in the given order.
pub fn to_display_with(rows: &[&InspectionRecord], columns: &[Column]) -> DisplayTable {
    DisplayTable {
        headers: columns.iter().map(|c| c.label().to_string()).collect(),
        rows: rows
            .iter()
            .map(|rec| columns.iter().map(|c| c.cell(rec)).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::CriticalFlag;

    fn sample() -> InspectionRecord {
        InspectionRecord {
            restaurant_name: "Joe'S Pizza".into(),
            borough: Some("Manhattan".into()),
            cuisine: Some("Pizza".into()),
            inspection_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            violation_description: Some("Evidence of mice".into()),
            critical_flag: CriticalFlag::Critical,
            grade: "A".into(),
            score: None,
            zip_code: Some(10001),
        }
    }

    #[test]
    fn default_projection_order_and_cells() {
        let rec = sample();
        let table = to_display(&[&rec]);
        assert_eq!(
            table.headers,
            [
                "Restaurant Name",
                "Borough",
                "Inspection Date",
                "Grade",
                "Score",
                "Critical Issue",
                "Violation Details"
            ]
        );
        assert_eq!(
            table.rows[0],
            ["Joe'S Pizza", "Manhattan", "2024-01-05", "A", "", "Critical", "Evidence of mice"]
        );
    }

    #[test]
    fn custom_projection() {
        let rec = sample();
        let table = to_display_with(&[&rec], &[Column::ZipCode, Column::Cuisine]);
        assert_eq!(table.headers, ["ZIP Code", "Cuisine"]);
        assert_eq!(table.rows[0], ["10001", "Pizza"]);
    }

    #[test]
    fn relabel_is_idempotent() {
        let raw = DisplayTable {
            headers: vec!["DBA".into(), "GRADE".into(), "Extra".into(), "Borough".into()],
            rows: vec![vec!["x".into(), "A".into(), "1".into(), "Bronx".into()]],
        };
        let once = raw.relabel();
        assert_eq!(once.headers, ["Restaurant Name", "Grade", "Extra", "Borough"]);
        let twice = once.clone().relabel();
        assert_eq!(once, twice);

        let rec = sample();
        let shown = to_display(&[&rec]);
        assert_eq!(shown.clone().relabel(), shown);
    }

    #[test]
    fn labels_are_fixed_points() {
        for c in Column::ALL {
            assert_eq!(display_label(c.source_header()), c.label());
            assert_eq!(display_label(c.label()), c.label());
        }
    }
}
