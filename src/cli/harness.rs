//! Run harness
//!
//! Drives a script through `Parsing → Configuring → Running → Reporting`:
//!
//! - malformed arguments print help and finish successfully without running
//!   the main routine;
//! - settings and the console log are configured from the parsed options;
//! - the main routine runs under a timer with an interrupt watcher armed;
//! - success is reported with the elapsed time, failures are logged with
//!   their full cause chain and handed back to the caller;
//! - SIGINT reports the elapsed time as a warning and exits with status -1.

use std::ffi::OsString;
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use crossterm::style::Color;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::cli::args::{parse_options, LogSetup, Parsed, ScriptArgs};
use crate::cli::output::{ColorLog, StatusLog, Tier};
use crate::config::defaults::INTERRUPTED_EXIT_CODE;
use crate::core::elapsed::{now_label, Elapsed, RunTimer};
use crate::core::logger::Logger;
use crate::core::settings::Settings;
use crate::error::HarnessError;
use crate::infra::dirs::ScriptDirs;
use crate::infra::interrupt::InterruptGuard;

/// Console configured for a run
#[derive(Debug)]
pub enum Console {
    Colored(ColorLog),
    Leveled(Logger),
}

impl Console {
    /// The leveled logger, when the script asked for one
    pub fn logger(&self) -> Option<&Logger> {
        match self {
            Self::Leveled(logger) => Some(logger),
            Self::Colored(_) => None,
        }
    }

    /// Run `f` with the console as the current `tracing` dispatcher, if it
    /// is leveled
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match self {
            Self::Leveled(logger) => logger.in_scope(f),
            Self::Colored(_) => f(),
        }
    }
}

impl Console {
    /// Emit a status message, overriding its color where the console is
    /// colored
    ///
    /// Leveled consoles color by severity and ignore the override.
    pub fn emit(&self, tier: Tier, message: &str, color: Option<Color>) {
        match self {
            Self::Colored(log) => log.emit(tier, message, color),
            Self::Leveled(logger) => logger.status(tier, message),
        }
    }
}

impl StatusLog for Console {
    fn status(&self, tier: Tier, message: &str) {
        match self {
            Self::Colored(log) => log.status(tier, message),
            Self::Leveled(logger) => logger.status(tier, message),
        }
    }
}

/// What the main routine receives
#[derive(Debug)]
pub struct Context<A> {
    options: A,
    console: Arc<Console>,
    timer: RunTimer,
}

impl<A> Context<A> {
    /// Parsed command-line options
    pub fn options(&self) -> &A {
        &self.options
    }

    /// Console for status messages
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Leveled logger, if configured
    pub fn logger(&self) -> Option<&Logger> {
        self.console.logger()
    }

    /// Time since the main routine started
    pub fn elapsed(&self) -> Elapsed {
        self.timer.elapsed()
    }
}

/// How a run ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Main routine returned normally
    Finished(Elapsed),
    /// Help or version text was shown instead of running
    HelpShown,
}

/// Top-level script runner
pub struct Harness {
    console: SharedConsole,
    help: BoxMakeWriter,
    ansi: bool,
    watch_interrupts: bool,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Status on stderr, help on stdout, colors when stderr is a terminal
    pub fn new() -> Self {
        use std::io::IsTerminal;

        Self {
            console: SharedConsole(Arc::new(BoxMakeWriter::new(std::io::stderr))),
            help: BoxMakeWriter::new(std::io::stdout),
            ansi: std::io::stderr().is_terminal(),
            watch_interrupts: true,
        }
    }

    /// Send status messages somewhere other than stderr
    #[must_use]
    pub fn with_console<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.console = SharedConsole(Arc::new(BoxMakeWriter::new(writer)));
        self
    }

    /// Send help text somewhere other than stdout
    #[must_use]
    pub fn with_help_output<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.help = BoxMakeWriter::new(writer);
        self
    }

    /// Force colors on or off
    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Do not install the SIGINT watcher
    #[must_use]
    pub fn without_interrupt_watch(mut self) -> Self {
        self.watch_interrupts = false;
        self
    }

    /// Run `main` with the process arguments
    pub fn run<A, F>(self, main: F) -> Result<Completion>
    where
        A: ScriptArgs,
        F: FnOnce(&Context<A>) -> Result<()>,
    {
        self.run_from(std::env::args_os(), main)
    }

    /// Run `main` with explicit arguments (including the program name)
    pub fn run_from<A, I, T, F>(self, args: I, main: F) -> Result<Completion>
    where
        A: ScriptArgs,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&Context<A>) -> Result<()>,
    {
        let options = match parse_options::<A, _, _>(args) {
            Parsed::Options(options) => options,
            Parsed::Help(request) => {
                if let Some(reason) = &request.reason {
                    write_line(&self.console, reason);
                }
                let mut out = self.help.make_writer();
                out.write_all(request.text.as_bytes())?;
                out.flush()?;
                return Ok(Completion::HelpShown);
            }
        };

        // No console exists yet to log a configuration failure; the caller
        // reports it.
        let console = Arc::new(self.configure(&options)?);

        let timer = RunTimer::start();
        let _guard = if self.watch_interrupts {
            let console = Arc::clone(&console);
            Some(
                InterruptGuard::install(move |_| {
                    console.warning(&format!("Interrupted by user after {}!", timer.elapsed()));
                    std::process::exit(INTERRUPTED_EXIT_CODE);
                })
                .map_err(|source| HarnessError::Interrupt { source })?,
            )
        } else {
            None
        };

        console.info(&format!(
            "############## Started script on {} ##############",
            timer.started_label()
        ));

        let context = Context {
            options,
            console: Arc::clone(&console),
            timer,
        };
        let result = console.in_scope(|| main(&context));
        let elapsed = timer.elapsed();

        match result {
            Ok(()) => {
                console.success(&format!(
                    "### Successfully finished in {elapsed}, on {} ###",
                    now_label()
                ));
                Ok(Completion::Finished(elapsed))
            }
            Err(e) => {
                console.error(&format!("Failed after {elapsed}: {e:#}"));
                Err(e)
            }
        }
    }

    fn configure<A: ScriptArgs>(&self, options: &A) -> Result<Console, HarnessError> {
        let settings = match options.settings_path() {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::load(&ScriptDirs::new())?,
        };
        let ansi = self.ansi && settings.color();

        let console = match options.log_setup() {
            LogSetup::Colored { verbose } => Console::Colored(
                ColorLog::boxed(self.share_console(), verbose).with_color(ansi),
            ),
            LogSetup::Leveled { verbosity, logfile } => {
                let mut builder = Logger::builder()
                    .level(settings.verbosity(verbosity))
                    .boxed_console(self.share_console())
                    .ansi(ansi)
                    .timestamp_format(settings.timestamp_format());
                if let Some(path) = logfile {
                    builder = builder.log_file(path, settings.rotation());
                }
                Console::Leveled(builder.build()?)
            }
        };
        Ok(console)
    }

    fn share_console(&self) -> BoxMakeWriter {
        BoxMakeWriter::new(self.console.clone())
    }
}

/// Console writer shared between the harness and the configured log
#[derive(Clone)]
struct SharedConsole(Arc<BoxMakeWriter>);

impl<'a> MakeWriter<'a> for SharedConsole {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.make_writer()
    }
}

fn write_line(console: &SharedConsole, message: &str) {
    let mut writer = console.make_writer();
    let _ = writeln!(writer, "{message}");
    let _ = writer.flush();
}
