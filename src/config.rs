//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Procure command-line configuration
#[derive(Debug, Parser)]
#[command(name = "procure", about = "Cost-minimising supplier mix selection", long_about = None)]
pub(crate) struct Config {
    /// Supplier catalog YAML file.
    #[arg(
        long,
        env = "PROCURE_CATALOG",
        default_value = "fixtures/catalogs/default.yml"
    )]
    pub catalog: PathBuf,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List the suppliers in the catalog.
    Suppliers {
        /// Only list suppliers of this raw material.
        #[arg(short, long)]
        material: Option<String>,
    },

    /// Allocate a demand across the suppliers of a raw material.
    Allocate(AllocateArgs),
}

/// Demand to allocate.
#[derive(Debug, Args)]
pub(crate) struct AllocateArgs {
    /// Raw material to source.
    #[arg(short, long)]
    pub material: String,

    /// Total quantity required.
    #[arg(short, long, allow_negative_numbers = true)]
    pub demand: f64,

    /// Minimum demand-weighted average quality.
    #[arg(long, allow_negative_numbers = true)]
    pub min_quality: f64,

    /// Maximum demand-weighted average delivery time.
    #[arg(long, allow_negative_numbers = true)]
    pub max_delivery: f64,

    /// Print the linear program before solving.
    #[arg(long)]
    pub show_model: bool,
}
