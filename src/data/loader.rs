use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::error::LoadError;
use super::model::{CriticalFlag, InspectionRecord, InspectionTable};

/// NYC Open Data "Restaurant Inspection Results" export.
pub const DATASET_URL: &str =
    "https://data.cityofnewyork.us/api/views/43nn-pn8j/rows.csv?accessType=DOWNLOAD";

/// Upstream headers the cleaning step cannot do without.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "DBA",
    "BORO",
    "CUISINE DESCRIPTION",
    "INSPECTION DATE",
    "VIOLATION DESCRIPTION",
    "CRITICAL FLAG",
    "GRADE",
    "ZIPCODE",
];

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
// The full export is well over 100 MB.
const FETCH_TIMEOUT: Duration = Duration::from_secs(600);

static DATASET: OnceLock<Arc<InspectionTable>> = OnceLock::new();

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// The cleaned upstream dataset, fetched on first use and shared for the
/// rest of the process.
///
/// A failed fetch leaves the cache empty; nothing retries on its own.
pub fn cached_dataset() -> Result<Arc<InspectionTable>, LoadError> {
    cached_with(&DATASET, || fetch_dataset(DATASET_URL))
}

/// Return the table held in `cell`, running `load` only while it is empty.
fn cached_with(
    cell: &OnceLock<Arc<InspectionTable>>,
    load: impl FnOnce() -> Result<InspectionTable, LoadError>,
) -> Result<Arc<InspectionTable>, LoadError> {
    if let Some(table) = cell.get() {
        return Ok(Arc::clone(table));
    }
    let table = Arc::new(load()?);
    Ok(Arc::clone(cell.get_or_init(|| table)))
}

/// Download `url` and run it through the cleaning pipeline.
pub fn fetch_dataset(url: &str) -> Result<InspectionTable, LoadError> {
    log::info!("Fetching inspection dataset from {url}");
    let client = reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    load_from_reader(response)
}

/// Load a local copy of the export (same header layout as upstream).
pub fn load_file(path: &Path) -> Result<InspectionTable, LoadError> {
    log::info!("Loading inspection dataset from {}", path.display());
    load_from_reader(File::open(path)?)
}

/// Project, coerce and clean an upstream-shaped CSV stream.
pub fn load_from_reader<R: Read>(source: R) -> Result<InspectionTable, LoadError> {
    // Trimmed here so the column check and the serde renames see the same names.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    if !headers.iter().any(|h| h == "SCORE") {
        log::warn!("Dataset has no SCORE column; scores will be empty");
    }

    let mut records = Vec::new();
    let mut missing_key = 0usize;
    let mut bad_date = 0usize;

    for row in reader.deserialize::<RawRow>() {
        let row = row?;
        match row.clean() {
            Ok(record) => records.push(record),
            Err(Rejected::MissingKey) => missing_key += 1,
            Err(Rejected::BadDate) => bad_date += 1,
        }
    }

    log::info!(
        "Loaded {} inspection rows ({missing_key} without name/grade, {bad_date} with invalid dates dropped)",
        records.len()
    );
    Ok(InspectionTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Raw row → InspectionRecord
// ---------------------------------------------------------------------------

/// Projection of one upstream row. Unlisted columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "DBA")]
    dba: Option<String>,
    #[serde(rename = "BORO")]
    boro: Option<String>,
    #[serde(rename = "CUISINE DESCRIPTION")]
    cuisine: Option<String>,
    #[serde(rename = "INSPECTION DATE")]
    inspection_date: Option<String>,
    #[serde(rename = "VIOLATION DESCRIPTION")]
    violation_description: Option<String>,
    #[serde(rename = "CRITICAL FLAG")]
    critical_flag: Option<String>,
    #[serde(rename = "GRADE")]
    grade: Option<String>,
    #[serde(rename = "SCORE", default)]
    score: Option<String>,
    #[serde(rename = "ZIPCODE")]
    zipcode: Option<String>,
}

enum Rejected {
    MissingKey,
    BadDate,
}

impl RawRow {
    fn clean(self) -> Result<InspectionRecord, Rejected> {
        let (Some(dba), Some(grade)) = (non_blank(self.dba), non_blank(self.grade)) else {
            return Err(Rejected::MissingKey);
        };
        let inspection_date = self
            .inspection_date
            .as_deref()
            .and_then(parse_inspection_date)
            .ok_or(Rejected::BadDate)?;

        Ok(InspectionRecord {
            restaurant_name: title_case(&dba),
            borough: non_blank(self.boro),
            cuisine: non_blank(self.cuisine),
            inspection_date,
            violation_description: non_blank(self.violation_description),
            critical_flag: self
                .critical_flag
                .as_deref()
                .map(CriticalFlag::parse)
                .unwrap_or(CriticalFlag::Unrecorded),
            grade,
            score: self.score.as_deref().and_then(parse_integer),
            zip_code: self.zipcode.as_deref().and_then(parse_integer),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

/// Lenient date parse; `None` means the row gets dropped.
pub fn parse_inspection_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    const DATETIME_FORMATS: [&str; 3] = [
        "%m/%d/%Y %I:%M:%S %p",
        "%m/%d/%Y %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Integer cells, also accepting integral floats such as `10001.0`.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Upper-case the first letter of every run of cased letters, lower-case the
/// rest.
///
/// Any uncased character starts a new run, so `"JOE'S"` becomes `"Joe'S"`.
/// Letters without case (CJK and the like) pass through and also break runs.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_uppercase() || ch.is_lowercase() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
