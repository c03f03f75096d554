//! `edc-death-report` command-line tool.

use clap::{ColorChoice, Parser};
use edc_cli::ValidationOutcome;
use edc_cli::config::Settings;
use edc_cli::logging::{LogConfig, LogFormat, init_logging};
use edc_cli::summary::print_outcome;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_register, run_show, run_submit, run_validate, run_vocab};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match cli.command {
        Command::Validate(args) => {
            outcome_exit_code(run_validate(&args, &settings), args.json)
        }
        Command::Submit(args) => outcome_exit_code(run_submit(&args, &settings), args.json),
        Command::Show(args) => unit_exit_code(run_show(&args, &settings)),
        Command::Register(args) => unit_exit_code(run_register(&args, &settings)),
        Command::Vocab(args) => unit_exit_code(run_vocab(&args, &settings)),
    };
    std::process::exit(exit_code);
}

fn outcome_exit_code(result: anyhow::Result<ValidationOutcome>, json: bool) -> i32 {
    match result {
        Ok(outcome) => {
            if json {
                match serde_json::to_string_pretty(&outcome) {
                    Ok(text) => println!("{text}"),
                    Err(error) => {
                        eprintln!("error: {error}");
                        return 1;
                    }
                }
            } else {
                print_outcome(&outcome);
            }
            if outcome.valid { 0 } else { 1 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn unit_exit_code(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
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
