//! Error types for the data layer.

/// Fatal errors while obtaining or cleaning the dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },
}

/// User-correctable problems with a query. Raised before any row is read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("invalid {field}: '{value}' is not a number")]
    InvalidInput { field: &'static str, value: String },

    #[error("select a restaurant name or enter a ZIP code")]
    MissingSelection,
}
