//! Colored status messages
//!
//! Status messages go to stderr so that data written to stdout stays clean
//! for piping. Each tier has a default color that callers may override.

use std::io::Write;

use crossterm::style::{Attribute, Color, Stylize};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::core::logger::{Logger, Severity};

/// Status message tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Info,
    Success,
    Warning,
    Error,
}

impl Tier {
    /// Default color of the tier (rendered bold)
    pub fn default_color(self) -> Color {
        match self {
            Self::Info => Color::White,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    /// Whether the tier is only shown with `--verbose`
    pub fn is_loud(self) -> bool {
        !matches!(self, Self::Error)
    }

    /// Leveled severity the tier maps to
    pub fn severity(self) -> Severity {
        match self {
            Self::Info | Self::Success => Severity::Info,
            Self::Warning => Severity::Warn,
            Self::Error => Severity::Error,
        }
    }
}

/// Anything that can report run status by tier
pub trait StatusLog {
    /// Emit a message at a tier
    fn status(&self, tier: Tier, message: &str);

    fn info(&self, message: &str) {
        self.status(Tier::Info, message);
    }

    fn success(&self, message: &str) {
        self.status(Tier::Success, message);
    }

    fn warning(&self, message: &str) {
        self.status(Tier::Warning, message);
    }

    fn error(&self, message: &str) {
        self.status(Tier::Error, message);
    }
}

impl StatusLog for Logger {
    fn status(&self, tier: Tier, message: &str) {
        self.log(tier.severity(), message);
    }
}

/// Wrap `message` in a color start and a reset sequence
pub fn paint(message: &str, color: Color) -> String {
    message
        .with(color)
        .attribute(Attribute::Bold)
        .to_string()
}

/// Four-tier colored console log
pub struct ColorLog {
    writer: BoxMakeWriter,
    verbose: bool,
    color: bool,
}

impl std::fmt::Debug for ColorLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorLog")
            .field("verbose", &self.verbose)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl ColorLog {
    /// Log to stderr
    pub fn stderr(verbose: bool) -> Self {
        Self::new(std::io::stderr, verbose)
    }

    /// Log to any writer
    pub fn new<W>(writer: W, verbose: bool) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self::boxed(BoxMakeWriter::new(writer), verbose)
    }

    /// Log to an already boxed writer
    pub fn boxed(writer: BoxMakeWriter, verbose: bool) -> Self {
        Self {
            writer,
            verbose,
            color: true,
        }
    }

    /// Enable or disable escape sequences
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Emit a message at a tier, optionally overriding its color
    pub fn emit(&self, tier: Tier, message: &str, color: Option<Color>) {
        if tier.is_loud() && !self.verbose {
            return;
        }

        let mut line = if self.color {
            paint(message, color.unwrap_or_else(|| tier.default_color()))
        } else {
            message.to_string()
        };
        line.push('\n');

        let mut writer = self.writer.make_writer();
        // Status output is best effort; a closed stderr must not abort the run.
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

impl StatusLog for ColorLog {
    fn status(&self, tier: Tier, message: &str) {
        self.emit(tier, message, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SharedBuffer;

    fn colors_enabled() -> bool {
        std::env::var_os("NO_COLOR").is_none()
    }

    #[test]
    fn test_paint_wraps_message() {
        let painted = paint("done", Color::Green);
        assert!(painted.contains("done"));
        if colors_enabled() {
            assert!(painted.starts_with("\u{1b}["));
            assert!(painted.ends_with("\u{1b}[0m"));
        }
    }

    #[test]
    fn test_quiet_log_only_shows_errors() {
        let buffer = SharedBuffer::default();
        let log = ColorLog::new(buffer.clone(), false).with_color(false);

        log.info("info");
        log.success("success");
        log.warning("warning");
        log.error("error");

        assert_eq!(buffer.contents(), "error\n");
    }

    #[test]
    fn test_verbose_log_shows_all_tiers_in_order() {
        let buffer = SharedBuffer::default();
        let log = ColorLog::new(buffer.clone(), true).with_color(false);

        log.info("info");
        log.success("success");
        log.warning("warning");
        log.error("error");

        assert_eq!(buffer.contents(), "info\nsuccess\nwarning\nerror\n");
    }

    #[test]
    fn test_color_override() {
        let buffer = SharedBuffer::default();
        let log = ColorLog::new(buffer.clone(), true);

        log.emit(Tier::Info, "custom", Some(Color::Blue));

        assert_eq!(buffer.contents(), format!("{}\n", paint("custom", Color::Blue)));
    }

    #[test]
    fn test_default_tier_colors() {
        assert_eq!(Tier::Info.default_color(), Color::White);
        assert_eq!(Tier::Success.default_color(), Color::Green);
        assert_eq!(Tier::Warning.default_color(), Color::Yellow);
        assert_eq!(Tier::Error.default_color(), Color::Red);
    }

    #[test]
    fn test_logger_maps_tiers_to_severities() {
        let buffer = SharedBuffer::default();
        let logger = Logger::builder()
            .level(Severity::Info)
            .console(buffer.clone())
            .build()
            .unwrap();

        logger.success("all good");
        logger.warning("careful");

        let output = buffer.contents();
        assert!(output.contains("INFO - all good"));
        assert!(output.contains("WARN - careful"));
    }
}
