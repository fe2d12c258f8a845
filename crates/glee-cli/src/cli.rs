//! CLI argument definitions for `glee`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use glee_cli::binding::ColumnBinding;

#[derive(Parser)]
#[command(
    name = "glee",
    version,
    about = "Glee World CSV imports - fans, members and sheet music",
    long_about = "Import CSV files into a Glee World record store.\n\n\
                  Headers are mapped onto the fields of an import profile, rows are\n\
                  validated, records that already exist are skipped, and every\n\
                  remaining row is inserted one at a time."
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

    /// Allow cell values (names, emails) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory of extra import profiles (*.json).
    #[arg(
        long = "profiles-dir",
        value_name = "DIR",
        env = "GLEE_PROFILES_DIR",
        global = true
    )]
    pub profiles_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a CSV file into a record store.
    Import(ImportArgs),

    /// Show how a CSV file maps onto a profile without importing.
    Inspect(InspectArgs),

    /// Write the CSV template of a profile.
    Template(TemplateArgs),

    /// List available import profiles.
    Profiles,

    /// Export the records of a store as CSV.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ImportArgs {
    /// CSV file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Import profile (fans, members, sheet-music, ...).
    #[arg(long, short = 'p')]
    pub profile: String,

    /// Record store file (JSON).
    #[arg(long, value_name = "PATH", env = "GLEE_STORE")]
    pub store: PathBuf,

    /// Bind a field to a column by hand; an empty column unbinds it.
    #[arg(long = "map", value_name = "TARGET=COLUMN")]
    pub map: Vec<ColumnBinding>,

    /// Import the valid rows even when some rows are invalid.
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,

    /// Validate and reconcile without writing to the store.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Remember the --map bindings for the next import with this profile.
    #[arg(long = "save-mapping")]
    pub save_mapping: bool,

    /// Directory of saved mappings.
    #[arg(
        long = "mapping-dir",
        value_name = "DIR",
        env = "GLEE_MAPPING_DIR",
        default_value = ".glee/mappings"
    )]
    pub mapping_dir: PathBuf,
}

#[derive(Args)]
pub struct InspectArgs {
    /// CSV file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Import profile to map against.
    #[arg(long, short = 'p')]
    pub profile: String,
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Import profile whose template to write.
    #[arg(long, short = 'p')]
    pub profile: String,

    /// Output file (default: stdout).
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Import profile whose columns to export.
    #[arg(long, short = 'p')]
    pub profile: String,

    /// Record store file (JSON).
    #[arg(long, value_name = "PATH", env = "GLEE_STORE")]
    pub store: PathBuf,

    /// Output file (default: stdout).
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
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
