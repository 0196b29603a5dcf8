//! Thesis CLI - validate and analyze aggregate research records
//!
//! This CLI provides analysts with a terminal interface to:
//! - Check records for structural problems before publishing
//! - Compute concentration, conviction, skew, momentum and tension metrics
//! - Inspect the active configuration
//!
//! Results are written to stdout as JSON; logs go to stderr.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thesis_metrics::SignalEngine;
use thesis_validator::Validator;

mod config;
mod output;
mod pipeline;

pub use config::ThesisConfig;
pub use output::{render, ValidationOutput};
pub use pipeline::{load_record, load_records, Pipeline, SubjectOutput};

/// Thesis CLI application
#[derive(Parser)]
#[command(name = "thesis")]
#[command(about = "Thesis - hypothesis weighting diagnostics", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "THESIS_CONFIG")]
    config: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Validate and analyze one or more record files
    Analyze {
        /// JSON aggregate record files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Skip analysis for records that fail validation
        #[arg(long)]
        strict: bool,
    },

    /// Run only the structural validator
    Validate {
        /// JSON aggregate record files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show configuration
    Config,
}

/// Run using the current process arguments.
pub async fn run() -> Result<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    let config = ThesisConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { files, strict } => {
            let pipeline = Pipeline {
                engine: SignalEngine::new(config.metrics).context("metrics configuration")?,
                validator: Validator::with_config(config.validator)
                    .context("validator configuration")?,
                strict,
            };
            let records = load_records(&files).await?;
            let outputs = pipeline.process_all(records).await?;
            println!("{}", render(&outputs, cli.pretty)?);
        }
        Commands::Validate { files } => {
            let validator =
                Validator::with_config(config.validator).context("validator configuration")?;
            let records = load_records(&files).await?;
            let outputs: Vec<ValidationOutput> = records
                .iter()
                .map(|(source, record)| ValidationOutput::new(source, validator.check(record)))
                .collect();
            println!("{}", render(&outputs, cli.pretty)?);

            let failing = outputs.iter().filter(|o| !o.errors.is_empty()).count();
            if failing > 0 {
                bail!("{} of {} record(s) are not analysis-ready", failing, outputs.len());
            }
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
