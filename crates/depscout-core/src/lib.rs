// Core logic lives here - config, the analysis runs and report rendering
pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod format;

pub use analysis::{Analyzer, DependencyAudit, ManifestSummary, OptimizationStatus, ProjectAnalysis};
pub use config::Config;
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use format::{format_size, preview};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
