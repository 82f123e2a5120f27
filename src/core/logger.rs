//! Leveled logger
//!
//! A [`Logger`] owns a `tracing` dispatcher with one console sink and an
//! optional rotating file sink. Five severities are recognised; `tracing`
//! only has four above `TRACE`, so critical records are `ERROR` events on
//! the [`CRITICAL_TARGET`] target.
//!
//! Records below the configured minimum are dropped by a per-sink filter.
//! Everything else is rendered as `timestamp - LEVEL - message` and written
//! to each sink immediately.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use chrono::Local;
use clap::ValueEnum;
use crossterm::style::{Color, Stylize};
use serde::{Deserialize, Serialize};
use tracing::{Dispatch, Event, Level, Metadata, Subscriber};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::config::defaults::{DEFAULT_TIMESTAMP_FORMAT, DEFAULT_VERBOSITY};
use crate::error::LoggerError;
use crate::infra::rotating::{RotatingFile, RotationPolicy};

/// Target carried by critical records
pub const CRITICAL_TARGET: &str = "critical";

/// Ordered log severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Critical,
    ];

    /// Upper-case name used in rendered records
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Console color of the level name
    pub fn color(self) -> Color {
        match self {
            Self::Debug => Color::Cyan,
            Self::Info => Color::White,
            Self::Warn => Color::Yellow,
            Self::Error => Color::Red,
            Self::Critical => Color::Magenta,
        }
    }

    /// Classify a `tracing` callsite
    pub fn of(metadata: &Metadata<'_>) -> Self {
        match *metadata.level() {
            Level::TRACE | Level::DEBUG => Self::Debug,
            Level::INFO => Self::Info,
            Level::WARN => Self::Warn,
            _ if metadata.target() == CRITICAL_TARGET => Self::Critical,
            _ => Self::Error,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        DEFAULT_VERBOSITY
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown severity '{s}': expected DEBUG, INFO, WARN, ERROR or CRITICAL")
            })
    }
}

/// Renders `timestamp - LEVEL - message fields`
#[derive(Debug, Clone)]
struct SeverityFormat {
    timestamp_format: String,
}

impl<S, N> FormatEvent<S, N> for SeverityFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let severity = Severity::of(event.metadata());
        write!(writer, "{} - ", Local::now().format(&self.timestamp_format))?;
        if writer.has_ansi_escapes() {
            write!(writer, "{} - ", severity.label().with(severity.color()).bold())?;
        } else {
            write!(writer, "{} - ", severity.label())?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builder for [`Logger`]
pub struct LoggerBuilder {
    level: Severity,
    console: BoxMakeWriter,
    ansi: bool,
    log_file: Option<(PathBuf, RotationPolicy)>,
    timestamp_format: String,
}

impl LoggerBuilder {
    /// Minimum severity that reaches the sinks
    #[must_use]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    /// Replace the console sink (stderr by default)
    #[must_use]
    pub fn console<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.console = BoxMakeWriter::new(writer);
        self
    }

    /// Same as [`LoggerBuilder::console`] for an already boxed writer
    #[must_use]
    pub fn boxed_console(mut self, writer: BoxMakeWriter) -> Self {
        self.console = writer;
        self
    }

    /// Color level names on the console
    #[must_use]
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Duplicate records into a rotating file
    #[must_use]
    pub fn log_file(mut self, path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        self.log_file = Some((path.into(), policy));
        self
    }

    /// strftime-style format for record timestamps
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Open the sinks and assemble the dispatcher
    pub fn build(self) -> Result<Logger, LoggerError> {
        let level = self.level;
        let filter = filter_fn(move |metadata| Severity::of(metadata) >= level);
        let format = SeverityFormat {
            timestamp_format: self.timestamp_format,
        };

        let console_layer = tracing_subscriber::fmt::layer()
            .event_format(format.clone())
            .with_writer(self.console)
            .with_ansi(self.ansi)
            .with_filter(filter.clone());

        let (file_layer, log_path) = match self.log_file {
            Some((path, policy)) => {
                let file = RotatingFile::open(&path, policy).map_err(|source| {
                    LoggerError::OpenLogFile {
                        path: path.clone(),
                        source,
                    }
                })?;
                let layer = tracing_subscriber::fmt::layer()
                    .event_format(format)
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(filter);
                (Some(layer), Some(path))
            }
            None => (None, None),
        };

        let subscriber = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        Ok(Logger {
            dispatch: Dispatch::new(subscriber),
            level,
            log_path,
        })
    }
}

/// Explicitly constructed leveled logger
///
/// Cloning is cheap and shares the underlying sinks.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    level: Severity,
    log_path: Option<PathBuf>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("log_path", &self.log_path)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Start building a logger: stderr console, minimum `ERROR`, no file
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            level: DEFAULT_VERBOSITY,
            console: BoxMakeWriter::new(std::io::stderr),
            ansi: false,
            log_file: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Minimum severity emitted
    pub fn level(&self) -> Severity {
        self.level
    }

    /// Active log file, if a file sink is attached
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Whether a record of this severity would be emitted
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level
    }

    /// Run `f` with this logger as the current `tracing` dispatcher
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Emit a record
    pub fn log(&self, severity: Severity, message: &str) {
        self.in_scope(|| match severity {
            Severity::Debug => tracing::debug!("{message}"),
            Severity::Info => tracing::info!("{message}"),
            Severity::Warn => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
            Severity::Critical => tracing::error!(target: CRITICAL_TARGET, "{message}"),
        });
    }

    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(Severity::Critical, message);
    }
}
