//! CLI argument definitions for `churn-etl`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use churn_cli::config::PipelineConfig;

#[derive(Parser)]
#[command(
    name = "churn-etl",
    version,
    about = "Customer churn ETL - clean, normalize and load a star schema",
    long_about = "Ingest a customer churn CSV, clean and normalize it, split it into a \
                  fact table and dimension tables keyed on customerid, and load them \
                  into SQLite.\n\n\
                  Each stage can also be run on its own."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pipeline config file (TOML). Flags override its values.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every stage and load the star schema.
    Run(RunArgs),

    /// Print a per-column profile of a source file.
    Profile(ProfileArgs),

    /// Clean a source file and write the result as CSV.
    Clean(StageArgs),

    /// Clean and transform a source file and write the result as CSV.
    Transform(StageArgs),

    /// Split a transformed CSV into one CSV per partition.
    Model(ModelArgs),

    /// Decompose a transformed CSV and load it into SQLite.
    Load(LoadArgs),

    /// Print the star-schema membership table.
    Schema,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Source CSV file.
    #[arg(long = "source", value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Destination for the transformed CSV.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// SQLite database file.
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Destination for the cleaned CSV.
    #[arg(long = "cleaned", value_name = "PATH")]
    pub cleaned: Option<PathBuf>,

    /// Directory for per-partition CSV files.
    #[arg(long = "partitions-dir", value_name = "DIR")]
    pub partitions_dir: Option<PathBuf>,

    /// Source field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,
}

impl RunArgs {
    pub fn as_overrides(&self) -> PipelineConfig {
        PipelineConfig {
            source_path: self.source.clone(),
            output_path: self.output.clone(),
            database_path: self.database.clone(),
            cleaned_path: self.cleaned.clone(),
            partitions_dir: self.partitions_dir.clone(),
            delimiter: self.delimiter,
            partitions: Vec::new(),
        }
    }
}

#[derive(Parser)]
pub struct ProfileArgs {
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Source field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,
}

#[derive(Parser)]
pub struct StageArgs {
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    #[arg(value_name = "OUT")]
    pub output: PathBuf,

    /// Source field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,
}

#[derive(Parser)]
pub struct ModelArgs {
    /// Transformed CSV, as written by `transform`.
    #[arg(value_name = "TRANSFORMED")]
    pub transformed: PathBuf,

    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Parser)]
pub struct LoadArgs {
    /// Transformed CSV, as written by `transform`.
    #[arg(value_name = "TRANSFORMED")]
    pub transformed: PathBuf,

    #[arg(value_name = "DATABASE")]
    pub database: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
