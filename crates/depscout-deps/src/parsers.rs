use crate::error::{DepsError, Result};
use crate::models::{DependencyKind, LoadedManifests, ManifestRecord};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Parse package.json content into a manifest record
///
/// Missing `name`, `dependencies` or `devDependencies` default to empty.
/// Version values that aren't strings (git objects, nulls, ...) become `*`.
pub fn parse_package_json(content: &str, location: &str) -> Result<ManifestRecord> {
    let package: Value = serde_json::from_str(content)?;
    let package = package.as_object().ok_or_else(|| DepsError::NotAnObject {
        location: location.to_string(),
    })?;

    let declared_name = package
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_name(location));

    Ok(ManifestRecord {
        location: location.to_string(),
        declared_name,
        dependencies: extract_table(package, DependencyKind::Production),
        dev_dependencies: extract_table(package, DependencyKind::Dev),
    })
}

/// Read and parse one manifest
///
/// Returns `None` for anything unusable so one broken file never takes the
/// rest of the tree down with it.
pub fn load_manifest(path: &Path, root: &Path) -> Option<ManifestRecord> {
    let location = relative_location(path, root);

    let result = std::fs::read_to_string(path)
        .map_err(DepsError::from)
        .and_then(|content| parse_package_json(&content, &location));

    match result {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(manifest = %location, error = %e, "Skipping manifest");
            None
        }
    }
}

/// Load every manifest in order, remembering which ones were skipped
pub fn load_manifests<I>(paths: I, root: &Path) -> LoadedManifests
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut loaded = LoadedManifests::default();

    for path in paths {
        match load_manifest(&path, root) {
            Some(record) => loaded.records.push(record),
            None => loaded.skipped.push(relative_location(&path, root)),
        }
    }

    loaded
}

/// Path of a manifest as shown in reports
pub fn relative_location(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn extract_table(package: &Map<String, Value>, kind: DependencyKind) -> BTreeMap<String, String> {
    package
        .get(kind.manifest_key())
        .and_then(|v| v.as_object())
        .map(|deps| {
            deps.iter()
                .map(|(name, value)| (name.clone(), value.as_str().unwrap_or("*").to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Unnamed packages go by their directory
fn fallback_name(location: &str) -> String {
    match Path::new(location).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
        _ => "(root)".to_string(),
    }
}
