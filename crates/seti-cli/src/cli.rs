//! CLI argument definitions for the SETI-IPRESS generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use seti_cli::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "seti",
    version,
    about = "SUSALUD SETI-IPRESS report generator",
    long_about = "Validate health-facility statistics and generate SETI-IPRESS report files.\n\n\
                  Rows are read from JSON or CSV, validated per table type and written as\n\
                  pipe-delimited Windows-1252 files named {IPRESS}_{YYYY}_{MM}_{SUFFIX}.TXT."
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

    /// Include row values (facility codes, periods) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate rows and generate a report file for one table.
    Generate(GenerateArgs),

    /// List supported table types.
    Tables,

    /// Print the contents of a generated report file.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Table type identifier (A, B1, B2, C1, C2, D1, D2, E, F, G, H, I).
    #[arg(long = "table", short = 't', value_name = "ID")]
    pub table: String,

    /// Input rows: a JSON array of objects or a CSV file with a header row.
    #[arg(long = "input", short = 'i', value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT_DIR>/output). Created when missing.
    #[arg(long = "output-dir", short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Fail when records disagree on period or facility code.
    ///
    /// By default the file is named after the first record and divergent
    /// records are written with a warning.
    #[arg(long = "strict-header")]
    pub strict_header: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Report file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "seti",
            "generate",
            "-t",
            "b1",
            "-i",
            "rows.csv",
            "--strict-header",
            "--log-data",
        ])
        .unwrap();
        assert!(cli.log_data);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.table, "b1");
                assert!(args.strict_header);
                assert!(args.output_dir.is_none());
            }
            _ => panic!("expected generate"),
        }
    }
}
