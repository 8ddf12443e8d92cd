//! Tracing subscriber setup for the `seti` binary.
//!
//! Level guide:
//!
//! - `error`: batch failures (no valid rows, write errors)
//! - `warn`: rejected rows, observer failures, divergent record headers
//! - `info`: batch start and completion, written file paths
//! - `debug`: per-row acceptance
//!
//! Event messages quote row values (periods, facility codes, raw cells).
//! [`redact_message`] replaces those values with [`REDACTED_VALUE`] unless row
//! logging is enabled, keeping row numbers, tables and field names readable.

use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use seti_core::{Event, EventKind, Observer};

/// Stand-in for row values when row logging is off.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Phrases after which the rest of a message is a raw row value.
const TRAILING_VALUE_AFTER: &[&str] = &[
    "no puede ser negativo: ",
    "no es un entero válido: ",
    "no es un monto válido: ",
    "tiene un tipo no soportado: ",
    "o un salto de línea: ",
    "no es un objeto JSON: ",
];

/// Precedes a quoted field name.
const FIELD_LABEL: &str = "campo ";

/// Crates whose level follows the configured filter.
const WORKSPACE_CRATES: &[&str] = &["seti_cli", "seti_core", "seti_model", "seti_txt"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter`.
    pub env_override: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            env_override: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_env_override(mut self, enabled: bool) -> Self {
        self.env_override = enabled;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.with_ansi = enabled;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Directive used when `RUST_LOG` is not consulted or not set.
    pub fn directive(&self) -> String {
        default_directive(self.level_filter)
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::registry()
        .with(format_layer(config, writer))
        .with(env_filter(config))
        .try_init()
        .context("a global subscriber is already installed")
}

fn format_layer(config: &LogConfig, writer: BoxMakeWriter) -> BoxedLayer {
    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => base.json().with_current_span(true).with_ansi(false).boxed(),
        (LogFormat::Compact, true) => base.compact().boxed(),
        (LogFormat::Compact, false) => base.compact().without_time().boxed(),
        (LogFormat::Pretty, true) => base.boxed(),
        (LogFormat::Pretty, false) => base.without_time().boxed(),
    }
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    if config.env_override
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.directive())
}

/// Workspace crates at `level`, everything else at warn.
pub fn default_directive(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    WORKSPACE_CRATES
        .iter()
        .fold(String::from("warn"), |directive, name| {
            format!("{directive},{name}={level}")
        })
}

/// Replace the row values quoted in an event message with [`REDACTED_VALUE`].
///
/// A quoted operand after `campo ` is a field name and stays, as does the
/// literal `'|'`. Any other quoted operand spans to the last quote before the
/// trailing value, so values containing quotes are covered whole.
pub fn redact_message(message: &str, log_data: bool) -> Cow<'_, str> {
    if log_data {
        return Cow::Borrowed(message);
    }
    let value_start = TRAILING_VALUE_AFTER
        .iter()
        .filter_map(|phrase| message.find(phrase).map(|at| at + phrase.len()))
        .min();
    let head = value_start.map_or(message, |end| &message[..end]);

    let mut out = String::with_capacity(message.len());
    let mut rest = head;
    while let Some(open) = rest.find('\'') {
        let (before, after) = (&rest[..open], &rest[open + 1..]);
        let close = if before.ends_with(FIELD_LABEL) || after.starts_with("|'") {
            after.find('\'')
        } else {
            after.rfind('\'')
        };
        let Some(close) = close else { break };
        out.push_str(before);
        out.push('\'');
        let quoted = &after[..close];
        if before.ends_with(FIELD_LABEL) || quoted == "|" {
            out.push_str(quoted);
        } else {
            out.push_str(REDACTED_VALUE);
        }
        out.push('\'');
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    if value_start.is_some() {
        out.push_str(REDACTED_VALUE);
    }
    Cow::Owned(out)
}

/// Forwards generation events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventLogger {
    log_data: bool,
}

impl EventLogger {
    /// `log_data` keeps event messages verbatim; otherwise their values are redacted.
    pub fn new(log_data: bool) -> Self {
        Self { log_data }
    }
}

impl Observer for EventLogger {
    fn update(&self, event: &Event) -> anyhow::Result<()> {
        let redacted = redact_message(&event.message, self.log_data);
        let detail = &*redacted;
        match event.kind {
            EventKind::Start | EventKind::Success => info!(kind = %event.kind, detail, "event"),
            EventKind::Error => warn!(kind = %event.kind, detail, "event"),
            EventKind::Critical => error!(kind = %event.kind, detail, "event"),
        }
        Ok(())
    }
}
