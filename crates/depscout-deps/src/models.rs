use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which dependency table a name was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Production, // "dependencies"
    Dev,        // "devDependencies"
}

impl DependencyKind {
    /// The package.json key this kind is read from
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyKind::Production => "dependencies",
            DependencyKind::Dev => "devDependencies",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyKind::Production => write!(f, "production"),
            DependencyKind::Dev => write!(f, "dev"),
        }
    }
}

/// One parsed manifest
///
/// Built once per discovered file and never mutated afterwards. The location
/// is relative to the scan root, which is also how it shows up in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub location: String,
    pub declared_name: String,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl ManifestRecord {
    /// Number of entries across both tables (a name in both counts twice)
    pub fn total_count(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    /// Every dependency name this manifest mentions, either kind
    pub fn dependency_names(&self) -> BTreeSet<&str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
            .collect()
    }
}

/// A single "declared-by" edge: which manifest asked for which version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyUsage {
    pub location: String,
    pub version: String,
}

impl DependencyUsage {
    pub fn new(location: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            version: version.into(),
        }
    }
}

/// Manifests that made it through parsing, plus the ones that didn't
#[derive(Debug, Clone, Default)]
pub struct LoadedManifests {
    pub records: Vec<ManifestRecord>,
    pub skipped: Vec<String>,
}

/// How heavy-dependency keywords are compared against dependency names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive equality
    #[default]
    Exact,
    /// Case-insensitive containment ("react-dom" hits "react")
    Substring,
}

/// A heavy-dependency hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeavyDependency {
    pub name: String,
    pub keyword: String,
    /// Declaring manifests across production and dev
    pub count: usize,
}
