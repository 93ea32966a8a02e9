//! origin-sync CLI
//!
//! Command-line interface for resolving origin configs and turning Swagger /
//! OpenAPI origins into standard data sources.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use origin_sync_common::{parse_document, OriginType, StandardDataSource};
use origin_sync_config::{normalize_from_path, JsonFileLoader, NormalizedConfig, PathResolver};
use origin_sync_engine::PipelineDriver;
use origin_sync_parser::{SwaggerV2Parser, SwaggerV3Parser};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// File stem used for the data source of the unnamed implicit origin
const DEFAULT_SOURCE_NAME: &str = "api";

#[derive(Parser)]
#[command(name = "origin-sync")]
#[command(version, about = "Resolve API origin configs and normalize Swagger/OpenAPI documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing origin-sync.json
    #[arg(short, long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// Project root directory (defaults to the config directory)
    #[arg(short, long, global = true)]
    root_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved base config and per-origin configs as JSON
    Config,

    /// Fetch every origin and write its standard data source
    #[command(after_help = "EXAMPLES:\n  \
        # Write data sources to the configured outDir\n  \
        origin-sync sync\n\n  \
        # Write data sources to a specific directory\n  \
        origin-sync sync --out ./services\n\n  \
        # Use a config in another directory\n  \
        origin-sync --config-dir ./frontend sync")]
    Sync {
        /// Output directory (overrides outDir from the config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Normalize a single local document and display a summary
    #[command(after_help = "EXAMPLES:\n  \
        # Parse a springfox export\n  \
        origin-sync parse --spec api-docs.json --format swagger-v2\n\n  \
        # Auto-detect the dialect\n  \
        origin-sync parse --spec openapi.yaml")]
    Parse {
        /// Path to the origin document
        #[arg(short, long)]
        spec: PathBuf,

        /// Document dialect (auto-detected if not specified)
        #[arg(short, long)]
        format: Option<SpecFormat>,

        /// Origin name recorded in the data source
        #[arg(long, default_value = "")]
        name: String,

        /// Derive interface names from method and path instead of operationId
        #[arg(long)]
        no_operation_id: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SpecFormat {
    /// Swagger 2.0
    SwaggerV2,
    /// OpenAPI 3.x
    SwaggerV3,
}

impl From<SpecFormat> for OriginType {
    fn from(format: SpecFormat) -> Self {
        match format {
            SpecFormat::SwaggerV2 => OriginType::SwaggerV2,
            SpecFormat::SwaggerV3 => OriginType::SwaggerV3,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = absolute(&cli.config_dir)?;
    let root_dir = match &cli.root_dir {
        Some(dir) => absolute(dir)?,
        None => config_dir.clone(),
    };

    match cli.command {
        Commands::Config => config_command(&root_dir, &config_dir)?,
        Commands::Sync { out } => {
            sync_command(&root_dir, &config_dir, out.as_deref(), cli.verbose).await?
        }
        Commands::Parse {
            spec,
            format,
            name,
            no_operation_id,
        } => parse_command(&spec, format, &name, !no_operation_id, cli.verbose)?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "origin_sync=debug"
    } else {
        "origin_sync=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(PathResolver::normalize(path));
    }
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok(PathResolver::normalize(&cwd.join(path)))
}

fn load_config(root_dir: &Path, config_dir: &Path) -> Result<NormalizedConfig> {
    let loader = JsonFileLoader::new();
    let config = normalize_from_path(&loader, root_dir, config_dir).with_context(|| {
        format!(
            "Failed to load {}",
            loader.config_path(config_dir).display()
        )
    })?;

    if config.is_absent() {
        bail!(
            "{} contains no configuration",
            loader.config_path(config_dir).display()
        );
    }

    Ok(config)
}

fn config_command(root_dir: &Path, config_dir: &Path) -> Result<()> {
    let config = load_config(root_dir, config_dir)?;
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{}", json);
    Ok(())
}

async fn sync_command(
    root_dir: &Path,
    config_dir: &Path,
    out: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let config = load_config(root_dir, config_dir)?;
    let out_dir = out
        .map(Path::to_path_buf)
        .or_else(|| config.base.as_ref().and_then(|base| base.out_dir.clone()));

    eprintln!(
        "{} Acquiring {} origin(s)",
        "→".cyan(),
        config.origins.len()
    );
    if verbose {
        for origin in &config.origins {
            eprintln!(
                "  • {} {}",
                origin.display_name().cyan(),
                origin.origin_url.as_deref().unwrap_or("<no originUrl>")
            );
        }
    }

    let report = PipelineDriver::default().run(&config.origins).await;

    let write_failures = match &out_dir {
        Some(dir) => write_sources(dir, &report.sources),
        None => {
            for source in &report.sources {
                let json = serde_json::to_string_pretty(source)
                    .context("Failed to serialize data source")?;
                println!("{}", json);
            }
            0
        }
    };

    for failure in &report.failures {
        let origin = if failure.origin.is_empty() {
            "<default>"
        } else {
            failure.origin.as_str()
        };
        eprintln!("{} {}: {}", "✗".red(), origin.yellow(), failure.error);
    }

    if report.all_failed() {
        bail!("All {} origin(s) failed", report.failures.len());
    }
    if write_failures > 0 {
        bail!("Failed to write {} data source(s)", write_failures);
    }

    eprintln!(
        "\n{}",
        format!(
            "✓ Synced {} of {} origin(s)",
            report.sources.len(),
            config.origins.len()
        )
        .green()
        .bold()
    );

    Ok(())
}

fn parse_command(
    spec_path: &Path,
    format: Option<SpecFormat>,
    name: &str,
    using_operation_id: bool,
    verbose: bool,
) -> Result<()> {
    println!("{} Parsing origin document: {}", "→".cyan(), spec_path.display());

    let content = std::fs::read_to_string(spec_path)
        .with_context(|| format!("Failed to read {}", spec_path.display()))?;

    let origin_type = match format {
        Some(format) => OriginType::from(format),
        None => {
            let detected = detect_origin_type(&content);
            println!("{} Auto-detected format: {}", "→".cyan(), detected.to_string().yellow());
            detected
        }
    };

    let source = match origin_type {
        OriginType::SwaggerV2 => SwaggerV2Parser::from_json(&content, name, using_operation_id)
            .context("Failed to load Swagger 2.0 document")?
            .parse()
            .context("Failed to normalize Swagger 2.0 document")?,
        OriginType::SwaggerV3 => SwaggerV3Parser::from_json(&content, name, using_operation_id)
            .context("Failed to load OpenAPI 3 document")?
            .parse()
            .context("Failed to normalize OpenAPI 3 document")?,
    };

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Data Source:".bold());
    println!("  Name: {}", source_label(&source).yellow());
    println!("  Base classes: {}", source.base_classes.len());
    println!("  Mods: {}", source.mods.len());
    println!("  Interfaces: {}", source.interface_count());

    let dangling = source.dangling_references();
    if !dangling.is_empty() {
        println!(
            "  {} Undefined references: {}",
            "!".yellow(),
            dangling.join(", ")
        );
    }

    if verbose {
        println!("\n{}", "Mods:".bold());
        for module in &source.mods {
            println!("  • {} ({} interfaces)", module.name.cyan(), module.interfaces.len());
            for interface in &module.interfaces {
                println!(
                    "    {} {} → {}",
                    interface.method.to_uppercase(),
                    interface.path,
                    interface.name
                );
            }
        }
    }

    Ok(())
}

/// OpenAPI 3 documents carry a top-level `openapi` key; everything else is
/// treated as Swagger 2.0
fn detect_origin_type(content: &str) -> OriginType {
    match parse_document::<serde_json::Value>(content) {
        Ok(document) if document.get("openapi").is_some() => OriginType::SwaggerV3,
        _ => OriginType::SwaggerV2,
    }
}

fn source_label(source: &StandardDataSource) -> &str {
    if source.name.is_empty() {
        DEFAULT_SOURCE_NAME
    } else {
        &source.name
    }
}

/// File name for a data source, confined to a single path component
///
/// Separators and other characters outside `[A-Za-z0-9._-]` become `_`, and
/// leading dots are stripped so the name can neither climb out of the output
/// directory nor hide itself.
fn output_file_name(source: &StandardDataSource) -> String {
    let stem: String = source_label(source)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');

    if stem.is_empty() {
        format!("{}.json", DEFAULT_SOURCE_NAME)
    } else {
        format!("{}.json", stem)
    }
}

/// Target file per source; `None` when an earlier source already claimed the
/// name (compared case-insensitively)
fn output_files(out_dir: &Path, sources: &[StandardDataSource]) -> Vec<Option<PathBuf>> {
    let mut claimed = BTreeSet::new();
    sources
        .iter()
        .map(|source| {
            let file_name = output_file_name(source);
            claimed
                .insert(file_name.to_ascii_lowercase())
                .then(|| out_dir.join(file_name))
        })
        .collect()
}

/// Write every source under `out_dir` and return how many could not be written
///
/// A failed or conflicting write is reported and the remaining sources are
/// still written.
fn write_sources(out_dir: &Path, sources: &[StandardDataSource]) -> usize {
    let mut failures = 0;

    for (source, file) in sources.iter().zip(output_files(out_dir, sources)) {
        let label = source_label(source);
        let Some(file) = file else {
            eprintln!(
                "{} {}: {} is already written by another origin",
                "✗".red(),
                label.yellow(),
                output_file_name(source)
            );
            failures += 1;
            continue;
        };

        match write_source(out_dir, &file, source) {
            Ok(()) => eprintln!(
                "{} {} → {} ({} interfaces)",
                "✓".green(),
                label.yellow(),
                file.display(),
                source.interface_count()
            ),
            Err(error) => {
                eprintln!("{} {}: {:#}", "✗".red(), label.yellow(), error);
                failures += 1;
            }
        }
    }

    failures
}

fn write_source(out_dir: &Path, file: &Path, source: &StandardDataSource) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let json = serde_json::to_string_pretty(source).context("Failed to serialize data source")?;
    std::fs::write(file, json).with_context(|| format!("Failed to write {}", file.display()))
}
