//! `seti`: SETI-IPRESS report generator.

use std::io::{self, IsTerminal};
use std::process;

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use seti_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command};
use crate::commands::{run_generate, run_inspect, run_tables};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: {error:#}");
        process::exit(1);
    }
    let code = run(&cli).unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        1
    });
    process::exit(code);
}

/// Exit code 1 when the batch or the command failed.
fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Command::Generate(args) => {
            let outcome = run_generate(args, cli.log_data)?;
            print_summary(&outcome);
            Ok(i32::from(outcome.has_errors()))
        }
        Command::Tables => run_tables().map(|()| 0),
        Command::Inspect(args) => run_inspect(args).map(|()| 0),
    }
}

/// `--log-level` wins over `-v/-q`; `RUST_LOG` applies only when neither is given.
fn log_config(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level_filter(explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()))
        .with_env_override(explicit.is_none() && !cli.verbosity.is_present())
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_ansi(ansi)
}
