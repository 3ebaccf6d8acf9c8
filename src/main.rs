//! json-config-transform CLI
//!
//! Entry point for the `json-config-transform` command-line tool.

use clap::Parser;
use json_config_transform::{document, transform, Options, Settings, TransformOptions};
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TOOL_NAME: &str = "json-config-transform";

#[derive(Parser)]
#[command(name = "json-config-transform")]
#[command(about = "Merge a baseline JSON configuration with an environment-specific override", version)]
struct Cli {
    /// Target environment name (e.g. Production)
    environment: Option<String>,

    /// Path to the baseline configuration document (default: ./appsettings.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Path to write the merged document (default: the baseline path)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// JSON document supplying any of the options; explicit flags win
    #[arg(long)]
    options: Option<PathBuf>,

    /// Tab-indent the output document
    #[arg(long)]
    indent: bool,

    /// Narrate every merge decision (debug-level logging)
    #[arg(long)]
    log: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.log {
        "json_config_transform=debug"
    } else {
        "json_config_transform=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", TOOL_NAME, e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let file_options = match &cli.options {
        Some(path) => load_options(path)?,
        None => Options::default(),
    };

    let flag_options = Options {
        environment: cli.environment,
        config_source: cli.config.map(|p| p.display().to_string()),
        output_path: cli.output.map(|p| p.display().to_string()),
        indent: cli.indent.then(|| Value::Bool(true)),
        log_enabled: cli.log.then(|| Value::Bool(true)),
    };

    let settings = Settings::new(Some(file_options.overlay(flag_options)))?;

    info!(
        "** Transforming JSON file '{}' for '{}' environment. **",
        settings.config_file_name, settings.environment
    );

    let base = document::load(&settings.config_source)?;
    let overrides = document::load(&settings.environment_config_source)?;

    let merged = transform(
        &base,
        &overrides,
        &TransformOptions {
            log_enabled: settings.log_enabled,
        },
    )?;

    let rendered = document::render(&merged, settings.indent)?;
    document::write(&settings.output_path, &rendered)?;

    Ok(())
}

/// Load an options document (the JSON sibling of the original plugin's
/// options object)
fn load_options(path: &Path) -> Result<Options, Box<dyn Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("failed to read options file {}: {}", path.display(), e))?;
    let options = serde_json::from_str(&contents)
        .map_err(|e| format!("failed to parse options file {}: {}", path.display(), e))?;
    Ok(options)
}
