//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "edc-death-report",
    version,
    about = "Validate and record participant death reports",
    long_about = "Validate death report submissions against the study's \
                  cross-field rules and record them in a store file.\n\n\
                  Submissions are JSON objects mapping field names to values."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: $EDC_CONFIG or ./edc-death-report.toml).
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

    /// Show participant identifiers and submitted values in logs
    /// (values are traced at `--log-level trace`).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a death report submission without saving it.
    Validate(ValidateArgs),

    /// Validate a submission and record it in the store.
    Submit(SubmitArgs),

    /// Print the stored death report for a subject.
    Show(ShowArgs),

    /// Add a registered subject to the store.
    Register(RegisterArgs),

    /// List controlled vocabularies.
    Vocab(VocabArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Submission JSON file.
    #[arg(value_name = "DATA.json")]
    pub data: PathBuf,

    /// Store file to resolve the registered subject from.
    #[arg(long = "store", value_name = "FILE", conflicts_with = "subject")]
    pub store: Option<PathBuf>,

    /// Registered subject JSON file, instead of a store.
    #[arg(long = "subject", value_name = "FILE")]
    pub subject: Option<PathBuf>,

    /// Print the outcome as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// Submission JSON file.
    #[arg(value_name = "DATA.json")]
    pub data: PathBuf,

    #[arg(long = "store", value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// User recorded in the audit fields.
    #[arg(long = "user", value_name = "NAME")]
    pub user: Option<String>,

    /// Replace the subject's existing report instead of creating one.
    #[arg(long = "update")]
    pub update: bool,

    /// Print the outcome as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Subject identifier.
    #[arg(value_name = "SUBJECT")]
    pub subject: String,

    #[arg(long = "store", value_name = "FILE")]
    pub store: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RegisterArgs {
    /// Registered subject JSON file.
    #[arg(value_name = "SUBJECT.json")]
    pub subject: PathBuf,

    #[arg(long = "store", value_name = "FILE")]
    pub store: Option<PathBuf>,
}

#[derive(Parser)]
pub struct VocabArgs {
    /// Vocabulary to list (cause, cause-category, diagnosis-code,
    /// medical-responsibility, reason-hospitalized). Lists all when omitted.
    #[arg(value_name = "KIND")]
    pub kind: Option<String>,
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
