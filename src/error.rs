use thiserror::Error;

/// Errors raised by dataset loading and cleaning.
///
/// None of these are fatal: the session that produced one keeps its
/// previous table.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    #[error("Unknown column(s): {}", names.join(", "))]
    UnknownColumn { names: Vec<String> },

    #[error("Unknown missing-value method: {0}")]
    UnknownStrategy(String),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::Parse(err.to_string())
    }
}

impl From<parquet::errors::ParquetError> for DatasetError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        DatasetError::Parse(err.to_string())
    }
}

impl From<arrow::error::ArrowError> for DatasetError {
    fn from(err: arrow::error::ArrowError) -> Self {
        DatasetError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
