use thiserror::Error;

/// All the ways a depscout run can go wrong
///
/// Bad manifests aren't in here on purpose: those get skipped further down,
/// so only problems with the run itself surface.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Project root not found: {0}")]
    RootNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
