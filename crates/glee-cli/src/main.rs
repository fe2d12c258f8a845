//! Glee World import CLI.

use clap::{ColorChoice, Parser};
use glee_cli::logging::{LogConfig, LogFormat, init_logging};
use glee_cli::profiles::load_profiles;
use glee_import::SessionError;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    ImportOutcome, run_export, run_import, run_inspect, run_profiles, run_template,
};
use crate::summary::print_import_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let profiles = match load_profiles(cli.profiles_dir.as_deref()) {
        Ok(profiles) => profiles,
        Err(error) => {
            report_error(&error);
            std::process::exit(1);
        }
    };
    let result = match &cli.command {
        Command::Import(args) => run_import(&profiles, args).map(|outcome| match outcome {
            ImportOutcome::Completed(completed) => {
                print_import_summary(completed.summary(), completed.skipped_invalid());
                i32::from(completed.summary().has_failures())
            }
            ImportOutcome::DryRun {
                fresh,
                duplicates,
                skipped_invalid,
            } => {
                println!(
                    "Dry run: {fresh} row(s) would be imported, \
                     {duplicates} duplicate(s), {skipped_invalid} invalid row(s) skipped"
                );
                0
            }
        }),
        Command::Inspect(args) => run_inspect(&profiles, args).map(|()| 0),
        Command::Template(args) => run_template(&profiles, args).map(|()| 0),
        Command::Profiles => run_profiles(&profiles).map(|()| 0),
        Command::Export(args) => run_export(&profiles, args).map(|()| 0),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    if let Some(SessionError::InvalidRows { preview, .. }) = error.downcast_ref::<SessionError>() {
        for line in preview {
            eprintln!("- {line}");
        }
        eprintln!("Fix the file and try again, or pass --skip-invalid to import the valid rows.");
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
