use thiserror::Error;

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, DepsError>;

/// Why a manifest couldn't be turned into a record
///
/// These never escape the aggregator: a bad manifest is logged and skipped.
#[derive(Error, Debug)]
pub enum DepsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Manifest {location} is not a JSON object")]
    NotAnObject { location: String },
}
