use thiserror::Error;

/// Errors raised while loading a dataset. A dataset that fails to load is
/// never partially served.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(String),

    #[error("Parquet: {0}")]
    Parquet(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: missing value for '{column}'")]
    MissingValue { row: usize, column: String },

    #[error("row {row}, '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: '{value}' is not a season year")]
    InvalidYear { row: usize, value: String },

    #[error("dataset contains no rows")]
    Empty,
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e.to_string())
    }
}

impl From<parquet::errors::ParquetError> for LoadError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        LoadError::Parquet(e.to_string())
    }
}

impl From<arrow::error::ArrowError> for LoadError {
    fn from(e: arrow::error::ArrowError) -> Self {
        LoadError::Parquet(e.to_string())
    }
}
