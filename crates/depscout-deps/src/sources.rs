use crate::discovery::{is_file, pruned_walk};
use crate::parsers::relative_location;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".vue", ".svelte", ".css", ".scss", ".sass", ".less",
];

/// A source file over the size threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub location: String,
    pub size: u64,
}

/// Totals for one source scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub file_count: usize,
    pub total_bytes: u64,
    /// Largest first
    pub large_files: Vec<SourceFile>,
}

impl SourceStats {
    /// How many of the large files are bigger than `bytes`
    pub fn count_larger_than(&self, bytes: u64) -> usize {
        self.large_files.iter().filter(|f| f.size > bytes).count()
    }
}

/// Counts and sizes source files, skipping the same directories as discovery
#[derive(Debug, Clone)]
pub struct SourceScanner {
    extensions: Vec<String>,
    skip_dirs: Vec<String>,
    large_file_bytes: u64,
}

impl SourceScanner {
    pub fn new(extensions: Vec<String>, skip_dirs: Vec<String>, large_file_bytes: u64) -> Self {
        Self {
            extensions,
            skip_dirs,
            large_file_bytes,
        }
    }

    fn is_source(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn scan(&self, root: &Path) -> SourceStats {
        let mut stats = SourceStats::default();

        for entry in pruned_walk(root, &self.skip_dirs) {
            if !self.is_source(&entry.file_name().to_string_lossy()) || !is_file(&entry) {
                continue;
            }

            // Follows symlinks, so a linked file reports its target's size
            let size = match std::fs::metadata(entry.path()) {
                Ok(meta) => meta.len(),
                Err(e) => {
                    debug!(path = %entry.path().display(), error = %e, "Can't stat source file");
                    continue;
                }
            };

            stats.file_count += 1;
            stats.total_bytes += size;

            if size > self.large_file_bytes {
                stats.large_files.push(SourceFile {
                    location: relative_location(entry.path(), root),
                    size,
                });
            }
        }

        stats
            .large_files
            .sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.location.cmp(&b.location)));
        stats
    }
}
