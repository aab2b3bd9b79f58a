//! CLI argument definitions for the CMOR output validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cmor-val",
    version,
    about = "CMOR output validator - Check climate model output files",
    long_about = "Check that climate model output files follow the CMOR naming\n\
                  conventions and that their contents agree with their names.\n\n\
                  Per file: filename decoding, content metadata, consistency of\n\
                  the filename date range with the time axis, time-axis\n\
                  contiguity, and a data-point spot read."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Validate a directory tree (or a single file) of model output.
    Validate(ValidateArgs),

    /// List the supported frequency codes and their date-token layouts.
    Frequencies,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Directory to search for data files, or a single file with --single-file.
    #[arg(value_name = "DATA_PATH")]
    pub data_path: PathBuf,

    /// Filename schema to decode against.
    #[arg(long = "schema", value_enum, default_value = "six-field")]
    pub schema: SchemaArg,

    /// Treat DATA_PATH as one file instead of a directory to search.
    #[arg(long = "single-file", short = 's')]
    pub single_file: bool,

    /// Treat the files as time-invariant fixed fields (no date range).
    #[arg(long = "fixed")]
    pub fixed: bool,

    /// Filename suffix that marks a data file.
    #[arg(long = "suffix", default_value = ".nc")]
    pub suffix: String,

    /// Write a JSON report of the run to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Filename schema choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum SchemaArg {
    /// variable_table_model_experiment_ensemble_dates
    FiveField,
    /// variable_table_model_experiment_ensemble_grid_dates
    SixField,
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
