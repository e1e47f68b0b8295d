// Dependency analysis module
// Finds package.json manifests, parses them and folds them into per-name
// indexes that the reports query for duplicates and heavy hitters

pub mod discovery;
pub mod error;
pub mod heavy;
pub mod index;
pub mod models;
pub mod parsers;
pub mod sources;

pub use discovery::{ManifestDiscovery, DEFAULT_MANIFEST_NAME, DEFAULT_SKIP_DIRS};
pub use error::{DepsError, Result};
pub use heavy::{HeavyMatcher, DEFAULT_HEAVY_KEYWORDS};
pub use index::{aggregate, common_dependencies, DependencyIndex, DependencyIndexes};
pub use models::{
    DependencyKind, DependencyUsage, HeavyDependency, LoadedManifests, ManifestRecord, MatchMode,
};
pub use parsers::{load_manifest, load_manifests, parse_package_json, relative_location};
pub use sources::{SourceFile, SourceScanner, SourceStats, DEFAULT_SOURCE_EXTENSIONS};
