use depscout_deps::{
    HeavyMatcher, ManifestDiscovery, MatchMode, SourceScanner, DEFAULT_HEAVY_KEYWORDS,
    DEFAULT_MANIFEST_NAME, DEFAULT_SKIP_DIRS, DEFAULT_SOURCE_EXTENSIONS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Loaded from an explicit path, the user config dir, or defaults - in that
/// order. Every field has a default so a half-written file still works.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub heavy: HeavyConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    /// Load config from a specific file; a missing file is an error here
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Get the config file path
    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("depscout");

        Ok(config_dir.join("config.toml"))
    }

    pub fn discovery(&self) -> ManifestDiscovery {
        ManifestDiscovery::new(self.scan.skip_dirs.clone(), self.scan.manifest_name.clone())
    }

    pub fn heavy_matcher(&self) -> HeavyMatcher {
        HeavyMatcher::new(&self.heavy.keywords, self.heavy.match_mode)
    }

    pub fn source_scanner(&self) -> SourceScanner {
        SourceScanner::new(
            self.sources.extensions.clone(),
            self.scan.skip_dirs.clone(),
            self.sources.large_file_bytes(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Directory names never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,
}

fn default_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect()
}

fn default_manifest_name() -> String {
    DEFAULT_MANIFEST_NAME.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip_dirs: default_skip_dirs(),
            manifest_name: default_manifest_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeavyConfig {
    #[serde(default = "default_heavy_keywords")]
    pub keywords: Vec<String>,

    /// "exact" or "substring"
    #[serde(default)]
    pub match_mode: MatchMode,
}

fn default_heavy_keywords() -> Vec<String> {
    DEFAULT_HEAVY_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

impl Default for HeavyConfig {
    fn default() -> Self {
        Self {
            keywords: default_heavy_keywords(),
            match_mode: MatchMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcesConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_large_file_kb")]
    pub large_file_kb: u64,

    #[serde(default = "default_very_large_file_kb")]
    pub very_large_file_kb: u64,
}

impl SourcesConfig {
    pub fn large_file_bytes(&self) -> u64 {
        self.large_file_kb.saturating_mul(1024)
    }

    /// Clamped to at least the large-file threshold
    pub fn very_large_file_bytes(&self) -> u64 {
        self.very_large_file_kb
            .saturating_mul(1024)
            .max(self.large_file_bytes())
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_large_file_kb() -> u64 {
    100
}

fn default_very_large_file_kb() -> u64 {
    500 // past this it really should be split up
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            large_file_kb: default_large_file_kb(),
            very_large_file_kb: default_very_large_file_kb(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Max duplicates / large files listed per section
    #[serde(default = "default_max_listed")]
    pub max_listed: usize,

    /// Max names in a one-line preview
    #[serde(default = "default_max_preview")]
    pub max_preview: usize,
}

fn default_max_listed() -> usize {
    10
}

fn default_max_preview() -> usize {
    5
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_listed: default_max_listed(),
            max_preview: default_max_preview(),
        }
    }
}
