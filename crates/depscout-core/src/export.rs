use crate::analysis::{DependencyAudit, ProjectAnalysis};
use crate::config::ReportConfig;
use crate::format::{format_size, preview};
use crate::Result;
use depscout_deps::{DependencyIndex, DependencyKind};
use serde::Serialize;

const RULE_WIDTH: usize = 50;

/// Heavy deps shown per manifest in the project report
const HEAVY_PER_MANIFEST: usize = 3;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" | "txt" => Some(ExportFormat::Text),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
        }
    }
}

/// Turns analysis results into something printable
pub struct Exporter {
    report: ReportConfig,
}

impl Exporter {
    pub fn new(report: ReportConfig) -> Self {
        Self { report }
    }

    pub fn render_project(&self, analysis: &ProjectAnalysis, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Text => Ok(self.project_to_text(analysis)),
            ExportFormat::Json => Self::to_json(analysis),
        }
    }

    pub fn render_audit(&self, audit: &DependencyAudit, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Text => Ok(self.audit_to_text(audit)),
            ExportFormat::Json => Self::to_json(audit),
        }
    }

    /// Pretty JSON for anything we report
    pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn project_to_text(&self, analysis: &ProjectAnalysis) -> String {
        let mut output = String::new();

        Self::heading(&mut output, "🔍 PROJECT ANALYSIS");
        output.push_str(&format!(
            "📦 Found {} {} files:\n",
            analysis.discovered_count(),
            analysis.manifest_name
        ));

        for manifest in &analysis.manifests {
            output.push_str(&format!("\n📁 {}\n", manifest.location));
            output.push_str(&format!("   Name: {}\n", manifest.name));
            output.push_str(&format!("   Dependencies: {}\n", manifest.dependencies));
            output.push_str(&format!("   Dev Dependencies: {}\n", manifest.dev_dependencies));
            output.push_str(&format!("   Total: {}\n", manifest.total));
            if !manifest.heavy.is_empty() {
                output.push_str(&format!(
                    "   🔥 Heavy deps: {}\n",
                    preview(&manifest.heavy, HEAVY_PER_MANIFEST)
                ));
            }
        }

        Self::skipped_section(&mut output, &analysis.skipped);

        output.push_str("\n📊 DEPENDENCY SUMMARY\n");
        output.push_str(&format!(
            "   Total unique dependencies: {}\n",
            analysis.unique_dependencies
        ));
        output.push_str(&format!("   Total dependency entries: {}\n", analysis.total_entries));

        output.push_str("\n📁 SOURCE CODE ANALYSIS\n");
        output.push_str(&format!("   Total source files: {}\n", analysis.sources.file_count));
        output.push_str(&format!(
            "   Total source size: {}\n",
            format_size(analysis.sources.total_bytes)
        ));

        if !analysis.sources.large_files.is_empty() {
            output.push_str(&format!(
                "\n🔥 LARGE SOURCE FILES (>{}):\n",
                format_size(analysis.large_file_bytes)
            ));
            for file in analysis.sources.large_files.iter().take(self.report.max_listed) {
                output.push_str(&format!("   {} - {}\n", format_size(file.size), file.location));
            }
        }

        output.push_str("\n⚠️  POTENTIAL ISSUES:\n");
        let mut issues = 0;
        if !analysis.common_dependencies.is_empty() {
            issues += 1;
            output.push_str(&format!(
                "   📦 {} dependencies appear in multiple workspaces\n",
                analysis.common_dependencies.len()
            ));
            output.push_str(&format!(
                "      Consider moving to root: {}\n",
                preview(&analysis.common_dependencies, self.report.max_preview)
            ));
        }
        if analysis.very_large_files > 0 {
            issues += 1;
            output.push_str(&format!(
                "   📄 {} source files are very large (>{})\n",
                analysis.very_large_files,
                format_size(analysis.very_large_file_bytes)
            ));
            output.push_str("      Consider splitting these files\n");
        }
        if issues == 0 {
            output.push_str("   ✅ No issues found\n");
        }

        Self::recommendations_section(&mut output, "💡 RECOMMENDATIONS:", &analysis.recommendations);

        output.push_str("\n✅ ANALYSIS COMPLETE\n");
        output
    }

    pub fn audit_to_text(&self, audit: &DependencyAudit) -> String {
        let mut output = String::new();

        Self::heading(&mut output, "🔍 DEPENDENCY OPTIMIZATION ANALYSIS");
        output.push_str(&format!("📦 Scanned {} manifests\n", audit.manifest_count));
        Self::skipped_section(&mut output, &audit.skipped);

        output.push_str("\n📦 DUPLICATE DEPENDENCIES:\n");
        self.duplicates_section(&mut output, DependencyKind::Production, &audit.duplicates);

        output.push_str("\n🛠️  DUPLICATE DEV DEPENDENCIES:\n");
        self.duplicates_section(&mut output, DependencyKind::Dev, &audit.dev_duplicates);

        if !audit.heavy.is_empty() {
            output.push_str("\n🔥 HEAVY DEPENDENCIES FOUND:\n");
            for heavy in &audit.heavy {
                output.push_str(&format!(
                    "      {} (used in {} workspace{})\n",
                    heavy.name,
                    heavy.count,
                    if heavy.count > 1 { "s" } else { "" }
                ));
            }
        }

        Self::recommendations_section(
            &mut output,
            "💡 OPTIMIZATION RECOMMENDATIONS:",
            &audit.recommendations,
        );

        output.push_str("\n📊 FINAL STATUS:\n");
        output.push_str(&format!("{} {}\n", audit.status.emoji(), audit.status.label()));
        output
    }

    fn heading(output: &mut String, title: &str) {
        output.push_str(&format!("{}\n", title));
        output.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    }

    fn skipped_section(output: &mut String, skipped: &[String]) {
        if skipped.is_empty() {
            return;
        }

        output.push_str(&format!(
            "\n❌ Skipped {} unreadable manifest(s):\n",
            skipped.len()
        ));
        for location in skipped {
            output.push_str(&format!("   - {}\n", location));
        }
    }

    fn duplicates_section(
        &self,
        output: &mut String,
        kind: DependencyKind,
        duplicates: &DependencyIndex,
    ) {
        if duplicates.is_empty() {
            output.push_str(&format!("   ✅ No duplicate {} dependencies found\n", kind));
            return;
        }

        output.push_str(&format!(
            "   Found {} duplicate {} dependencies:\n",
            duplicates.len(),
            kind
        ));
        for (name, usages) in duplicates.iter().take(self.report.max_listed) {
            output.push_str(&format!("      {}:\n", name));
            for usage in usages {
                output.push_str(&format!("         - {} ({})\n", usage.location, usage.version));
            }
        }
        if duplicates.len() > self.report.max_listed {
            output.push_str(&format!(
                "      ... and {} more\n",
                duplicates.len() - self.report.max_listed
            ));
        }
    }

    fn recommendations_section(output: &mut String, title: &str, recommendations: &[String]) {
        output.push_str(&format!("\n{}\n", title));
        for (i, rec) in recommendations.iter().enumerate() {
            output.push_str(&format!("   {}. {}\n", i + 1, rec));
        }
    }
}
