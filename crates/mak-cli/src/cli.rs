//! CLI argument definitions for the catalogue viewer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mak-catalog",
    version,
    about = "MAK operation-time catalogue viewer",
    long_about = "Browse the garment operation-time catalogue.\n\n\
                  Rows are read from the shared workbook (or a folder of CSV sheet exports),\n\
                  narrowed with four dependent filters: category, garment, position and\n\
                  operation, and exported to CSV or PDF."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// JSON configuration file (defaults are built in).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Read sheets from a folder of `<sheet>.csv` exports instead of the remote workbook.
    #[arg(long = "source-dir", value_name = "DIR", global = true)]
    pub source_dir: Option<PathBuf>,

    /// Google Sheets API key (falls back to MAK_SHEETS_API_KEY).
    #[arg(long = "api-key", value_name = "KEY", global = true)]
    pub api_key: Option<String>,

    /// OAuth access token (falls back to MAK_SHEETS_ACCESS_TOKEN).
    #[arg(long = "access-token", value_name = "TOKEN", global = true)]
    pub access_token: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the filter options and the matching rows.
    Show(FilterArgs),

    /// Write the matching rows to a CSV or PDF file.
    Export(ExportArgs),

    /// Interactive session: change filters one command at a time.
    Browse(BrowseArgs),
}

#[derive(Args, Clone)]
pub struct FilterArgs {
    /// Catalogue language.
    #[arg(long = "language", short = 'l', value_enum)]
    pub language: Option<LanguageArg>,

    /// Category filter.
    #[arg(long = "category", value_name = "VALUE")]
    pub category: Option<String>,

    /// Garment filter.
    #[arg(long = "garment", value_name = "VALUE")]
    pub garment: Option<String>,

    /// Position filter.
    #[arg(long = "position", value_name = "VALUE")]
    pub position: Option<String>,

    /// Operation filter.
    #[arg(long = "operation", value_name = "VALUE")]
    pub operation: Option<String>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Clone)]
pub struct PolicyArgs {
    /// How dropdown options are derived (overrides config).
    #[arg(long = "options", value_enum)]
    pub options: Option<OptionPolicyArg>,

    /// What happens to a selection no row matches (overrides config).
    #[arg(long = "reconcile", value_enum)]
    pub reconcile: Option<ReconcilePolicyArg>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Export format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,

    /// Output file (default: catalogue.<format> in the current directory).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct BrowseArgs {
    /// Language to start in.
    #[arg(long = "language", short = 'l', value_enum)]
    pub language: Option<LanguageArg>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    English,
    Spanish,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OptionPolicyArg {
    Cascading,
    Intersective,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReconcilePolicyArg {
    AutoReset,
    Persistent,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Pdf,
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
