use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurgeError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: u64, reason: String },
    #[error("Invalid milestone: {0}")]
    InvalidMilestone(String),
    #[error("No milestone set available: per-zone configuration is empty and has no fallback")]
    NoMilestoneSetAvailable,
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Invalid zone key: {0}")]
    InvalidZoneKey(String),
}

pub type Result<T> = std::result::Result<T, SurgeError>;
