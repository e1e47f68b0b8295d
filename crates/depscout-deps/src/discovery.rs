use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Build output and dependency caches - nobody wants manifests from in there
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".next",
    ".turbo",
    ".nx",
    ".cache",
    ".git",
];

pub const DEFAULT_MANIFEST_NAME: &str = "package.json";

/// Finds manifest files under a root directory
#[derive(Debug, Clone)]
pub struct ManifestDiscovery {
    skip_dirs: Vec<String>,
    manifest_name: String,
}

impl Default for ManifestDiscovery {
    fn default() -> Self {
        Self::new(
            DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
            DEFAULT_MANIFEST_NAME,
        )
    }
}

impl ManifestDiscovery {
    pub fn new(skip_dirs: Vec<String>, manifest_name: impl Into<String>) -> Self {
        Self {
            skip_dirs,
            manifest_name: manifest_name.into(),
        }
    }

    /// Lazily walk `root` and yield every manifest outside the denylist
    ///
    /// Entries are visited in file-name order so repeated scans of the same
    /// tree report locations in the same order.
    pub fn discover<'a>(&'a self, root: &Path) -> impl Iterator<Item = PathBuf> + 'a {
        pruned_walk(root, &self.skip_dirs)
            .filter(move |entry| {
                entry.file_name() == self.manifest_name.as_str() && is_file(entry)
            })
            .map(DirEntry::into_path)
    }
}

/// Recursive walk that never descends into a denylisted directory
///
/// The root itself is always walked, whatever it's called. Entries we can't
/// read get logged and dropped instead of ending the walk.
pub(crate) fn pruned_walk<'a>(
    root: &Path,
    skip_dirs: &'a [String],
) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| entry.depth() == 0 || !is_skipped_dir(entry, skip_dirs))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "Skipping unreadable entry");
                None
            }
        })
}

/// Regular files, and symlinks that resolve to one
///
/// Directory symlinks are still never descended into.
pub(crate) fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn is_skipped_dir(entry: &DirEntry, skip_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && skip_dirs
            .iter()
            .any(|skipped| entry.file_name() == skipped.as_str())
}
