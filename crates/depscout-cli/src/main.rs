use anyhow::Context;
use clap::Parser;
use depscout_core::{Analyzer, Config, ExportFormat, Exporter};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "depscout")]
#[command(version, about = "Find duplicate and heavy dependencies across package.json workspaces", long_about = None)]
struct Cli {
    /// Project root to scan
    #[arg(long, short, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to the user config dir)
    #[arg(long, global = true, env = "DEPSCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, short, global = true, default_value = "text", value_parser = parse_format)]
    format: ExportFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manifest summaries, dependency totals and source sizes
    Analyze,
    /// Duplicate and heavy dependencies across workspaces
    Duplicates,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to disk
    Init,
}

fn parse_format(name: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(name).ok_or_else(|| {
        format!(
            "unknown format '{}', expected {} or {}",
            name,
            ExportFormat::Text.name(),
            ExportFormat::Json.name()
        )
    })
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never end up mixed into a JSON report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "depscout=warn,depscout_core=warn,depscout_deps=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match (&cli.command, cli.config.as_deref()) {
        // init may be pointed at a file that doesn't exist yet
        (Commands::Config { action: ConfigAction::Init }, Some(path)) if !path.exists() => {
            Config::default()
        }
        (_, path) => load_config(path)?,
    };
    let format = cli.format;

    match cli.command {
        Commands::Analyze => {
            tracing::info!("Analyzing project at {}", cli.root.display());
            let exporter = Exporter::new(config.report.clone());
            let analysis = Analyzer::new(config)
                .analyze_project(&cli.root)
                .context("Project analysis failed")?;
            println!("{}", exporter.render_project(&analysis, format)?);
        }
        Commands::Duplicates => {
            tracing::info!("Auditing dependencies at {}", cli.root.display());
            let exporter = Exporter::new(config.report.clone());
            let audit = Analyzer::new(config)
                .audit_dependencies(&cli.root)
                .context("Dependency audit failed")?;
            println!("{}", exporter.render_audit(&audit, format)?);
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => print!("{}", config.to_toml()?),
            ConfigAction::Init => {
                let written = match &cli.config {
                    Some(path) => {
                        config.save_to(path)?;
                        path.clone()
                    }
                    None => config.save()?,
                };
                println!("Wrote config to {}", written.display());
            }
        },
    }

    Ok(())
}
