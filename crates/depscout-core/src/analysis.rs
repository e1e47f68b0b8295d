use crate::format::preview;
use crate::{Config, Error, Result};
use chrono::{DateTime, Utc};
use depscout_deps::{
    aggregate, common_dependencies, load_manifests, DependencyIndex, DependencyIndexes,
    HeavyDependency, LoadedManifests, ManifestRecord, MatchMode, SourceStats,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// More unique dependencies than this and we suggest consolidating
const CONSOLIDATION_THRESHOLD: usize = 50;

/// Overall verdict from the duplicate count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationStatus {
    /// No duplicates at all
    WellOptimized,
    /// Fewer than 10 duplicates
    SomeOptimization,
    /// 10 or more
    Significant,
}

impl OptimizationStatus {
    pub fn from_duplicate_count(count: usize) -> Self {
        match count {
            0 => OptimizationStatus::WellOptimized,
            1..=9 => OptimizationStatus::SomeOptimization,
            _ => OptimizationStatus::Significant,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            OptimizationStatus::WellOptimized => "✅",
            OptimizationStatus::SomeOptimization => "⚠️ ",
            OptimizationStatus::Significant => "❌",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptimizationStatus::WellOptimized => "Dependencies are well optimized",
            OptimizationStatus::SomeOptimization => "Some dependency optimization possible",
            OptimizationStatus::Significant => "Significant dependency optimization needed",
        }
    }
}

/// Per-manifest line items for the project report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestSummary {
    pub location: String,
    pub name: String,
    pub dependencies: usize,
    pub dev_dependencies: usize,
    pub total: usize,
    /// Production deps that look like build tools or frameworks
    pub heavy: Vec<String>,
}

/// Everything `depscout analyze` reports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectAnalysis {
    pub root: String,
    pub generated_at: DateTime<Utc>,
    pub manifest_name: String,
    pub manifests: Vec<ManifestSummary>,
    pub skipped: Vec<String>,
    pub unique_dependencies: usize,
    pub total_entries: usize,
    pub sources: SourceStats,
    pub large_file_bytes: u64,
    pub very_large_file_bytes: u64,
    pub very_large_files: usize,
    /// Declared by every manifest; empty unless there are several
    pub common_dependencies: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ProjectAnalysis {
    /// Manifests found on disk, parsed or not
    pub fn discovered_count(&self) -> usize {
        self.manifests.len() + self.skipped.len()
    }
}

/// Everything `depscout duplicates` reports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyAudit {
    pub root: String,
    pub generated_at: DateTime<Utc>,
    pub manifest_count: usize,
    pub skipped: Vec<String>,
    pub duplicates: DependencyIndex,
    pub dev_duplicates: DependencyIndex,
    pub heavy: Vec<HeavyDependency>,
    pub root_candidates: Vec<String>,
    pub dev_root_candidates: Vec<String>,
    pub status: OptimizationStatus,
    pub recommendations: Vec<String>,
}

impl DependencyAudit {
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len() + self.dev_duplicates.len()
    }
}

/// Runs discovery -> parse -> fold -> query against a project root
pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn load(&self, root: &Path) -> Result<LoadedManifests> {
        if !root.is_dir() {
            return Err(Error::RootNotFound(root.display().to_string()));
        }

        let discovery = self.config.discovery();
        let loaded = load_manifests(discovery.discover(root), root);

        info!(
            root = %root.display(),
            manifests = loaded.records.len(),
            skipped = loaded.skipped.len(),
            "Scanned manifests"
        );

        Ok(loaded)
    }

    /// Manifest summaries, dependency totals and source-file sizes
    pub fn analyze_project(&self, root: &Path) -> Result<ProjectAnalysis> {
        let loaded = self.load(root)?;
        let indexes = aggregate(&loaded.records);

        let substring = self.config.heavy_matcher().with_mode(MatchMode::Substring);
        let manifests = loaded
            .records
            .iter()
            .map(|record| ManifestSummary {
                location: record.location.clone(),
                name: record.declared_name.clone(),
                dependencies: record.dependencies.len(),
                dev_dependencies: record.dev_dependencies.len(),
                total: record.total_count(),
                heavy: record
                    .dependencies
                    .keys()
                    .filter(|name| substring.matches(name).is_some())
                    .cloned()
                    .collect(),
            })
            .collect();

        let sources = self.config.source_scanner().scan(root);
        let very_large_file_bytes = self.config.sources.very_large_file_bytes();
        let very_large_files = sources.count_larger_than(very_large_file_bytes);
        info!(
            files = sources.file_count,
            bytes = sources.total_bytes,
            "Scanned source files"
        );

        let unique_dependencies = indexes.unique_names().len();

        Ok(ProjectAnalysis {
            root: root.display().to_string(),
            generated_at: Utc::now(),
            manifest_name: self.config.scan.manifest_name.clone(),
            manifests,
            skipped: loaded.skipped,
            unique_dependencies,
            total_entries: indexes.total_entries(),
            sources,
            large_file_bytes: self.config.sources.large_file_bytes(),
            very_large_file_bytes,
            very_large_files,
            common_dependencies: common_dependencies(&loaded.records).into_iter().collect(),
            recommendations: project_recommendations(unique_dependencies),
        })
    }

    /// Duplicates, heavy dependencies and what could move to the root
    pub fn audit_dependencies(&self, root: &Path) -> Result<DependencyAudit> {
        let loaded = self.load(root)?;
        Ok(self.audit_records(root, &loaded.records, loaded.skipped))
    }

    fn audit_records(
        &self,
        root: &Path,
        records: &[ManifestRecord],
        skipped: Vec<String>,
    ) -> DependencyAudit {
        let indexes: DependencyIndexes = aggregate(records);
        let manifest_count = records.len();

        let duplicates = indexes.production.duplicates();
        let dev_duplicates = indexes.dev.duplicates();
        let root_candidates = indexes.production.root_candidates(manifest_count);
        let dev_root_candidates = indexes.dev.root_candidates(manifest_count);

        let recommendations = audit_recommendations(
            &duplicates,
            &dev_duplicates,
            &root_candidates,
            &dev_root_candidates,
            self.config.report.max_preview,
        );

        DependencyAudit {
            root: root.display().to_string(),
            generated_at: Utc::now(),
            manifest_count,
            skipped,
            status: OptimizationStatus::from_duplicate_count(indexes.duplicate_count()),
            heavy: indexes.heavy(&self.config.heavy_matcher()),
            duplicates,
            dev_duplicates,
            root_candidates,
            dev_root_candidates,
            recommendations,
        }
    }
}

fn project_recommendations(unique_dependencies: usize) -> Vec<String> {
    let mut recs = vec![
        "Use 'npm ci' instead of 'npm install' for faster, consistent installs".to_string(),
        "Consider using .npmrc with 'prefer-offline=true' to speed up installs".to_string(),
        "Regularly audit dependencies with 'npm audit'".to_string(),
    ];

    if unique_dependencies > CONSOLIDATION_THRESHOLD {
        recs.push(format!(
            "Consider dependency consolidation - you have {} unique deps",
            unique_dependencies
        ));
    }

    recs
}

fn audit_recommendations(
    duplicates: &DependencyIndex,
    dev_duplicates: &DependencyIndex,
    root_candidates: &[String],
    dev_root_candidates: &[String],
    max_preview: usize,
) -> Vec<String> {
    let mut recs = Vec::new();

    let hoist = |label: &str, candidates: &[String]| {
        if candidates.is_empty() {
            format!("Move common {} to root package.json", label)
        } else {
            format!(
                "Move common {} to root package.json (candidates: {})",
                label,
                preview(candidates, max_preview)
            )
        }
    };

    if !duplicates.is_empty() {
        recs.push(hoist("dependencies", root_candidates));
    }
    if !dev_duplicates.is_empty() {
        recs.push(hoist("dev dependencies", dev_root_candidates));
    }

    recs.push("Consider using 'npm dedupe' to reduce duplicate packages".to_string());
    recs.push("Use 'npm ls --depth=0' to see top-level dependencies".to_string());
    recs.push("Consider using 'bundlephobia.com' to check package sizes".to_string());
    recs
}
