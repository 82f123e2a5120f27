//! Option parsing
//!
//! Two flag groups cover the two logging styles: [`BasicArgs`] (a single
//! `--verbose` toggle for colored status output) and [`LeveledArgs`]
//! (`--verbosity LEVEL` plus an optional `--logfile`). Scripts flatten one of
//! them into their own `clap` struct and implement [`ScriptArgs`].
//!
//! Parsing never exits the process: malformed input becomes
//! [`Parsed::Help`] and the caller decides what to print.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{Args, Parser};

use crate::core::logger::Severity;

/// How a script wants its console configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSetup {
    /// Four-tier colored status messages
    Colored { verbose: bool },
    /// Five-level filtered records, optionally mirrored to a rotating file
    Leveled {
        verbosity: Option<Severity>,
        logfile: Option<PathBuf>,
    },
}

/// Options accepted by a script run through the harness
pub trait ScriptArgs: Parser {
    /// Logging configuration requested on the command line
    fn log_setup(&self) -> LogSetup;

    /// Explicit settings file, if any
    fn settings_path(&self) -> Option<&Path> {
        None
    }
}

/// `-v/--verbose` toggle
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicArgs {
    /// Be loud!
    #[arg(short, long)]
    pub verbose: bool,
}

impl BasicArgs {
    pub fn log_setup(&self) -> LogSetup {
        LogSetup::Colored {
            verbose: self.verbose,
        }
    }
}

/// `-v/--verbosity LEVEL` and `-l/--logfile PATH`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LeveledArgs {
    /// Minimum level to log [default: ERROR]
    #[arg(short = 'v', long, value_enum, ignore_case = true, value_name = "LEVEL")]
    pub verbosity: Option<Severity>,

    /// Also write logs to this file, rotated by size
    #[arg(short, long, value_name = "PATH")]
    pub logfile: Option<PathBuf>,
}

impl LeveledArgs {
    pub fn log_setup(&self) -> LogSetup {
        LogSetup::Leveled {
            verbosity: self.verbosity,
            logfile: self.logfile.clone(),
        }
    }
}

/// Minimal script options: just the verbosity toggle
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct BasicCli {
    #[command(flatten)]
    pub basic: BasicArgs,
}

impl ScriptArgs for BasicCli {
    fn log_setup(&self) -> LogSetup {
        self.basic.log_setup()
    }
}

/// Text to show instead of running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest {
    /// Help (or version) text for stdout
    pub text: String,
    /// Why parsing stopped, when the input was malformed
    pub reason: Option<String>,
}

/// Outcome of parsing the command line
#[derive(Debug)]
pub enum Parsed<A> {
    Options(A),
    Help(HelpRequest),
}

/// Parse `args` (including the program name) into `A`
pub fn parse_options<A, I, T>(args: I) -> Parsed<A>
where
    A: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match A::try_parse_from(args) {
        Ok(options) => Parsed::Options(options),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Parsed::Help(HelpRequest {
                text: err.to_string(),
                reason: None,
            }),
            _ => Parsed::Help(HelpRequest {
                text: A::command().render_help().to_string(),
                reason: Some(err.to_string().trim_end().to_string()),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    #[command(name = "leveled")]
    struct LeveledCli {
        #[command(flatten)]
        leveled: LeveledArgs,

        /// Extra domain flag
        #[arg(long)]
        name: Option<String>,
    }

    fn options<A: Parser>(args: &[&str]) -> A {
        match parse_options::<A, _, _>(args.iter().copied()) {
            Parsed::Options(options) => options,
            Parsed::Help(help) => panic!("unexpected help: {help:?}"),
        }
    }

    fn help<A: Parser + std::fmt::Debug>(args: &[&str]) -> HelpRequest {
        match parse_options::<A, _, _>(args.iter().copied()) {
            Parsed::Help(help) => help,
            Parsed::Options(options) => panic!("unexpected options: {options:?}"),
        }
    }

    #[test]
    fn test_basic_defaults_to_quiet() {
        let cli: BasicCli = options(&["script"]);
        assert_eq!(cli.log_setup(), LogSetup::Colored { verbose: false });
    }

    #[test]
    fn test_basic_verbose_flag() {
        for flag in ["-v", "--verbose"] {
            let cli: BasicCli = options(&["script", flag]);
            assert_eq!(cli.log_setup(), LogSetup::Colored { verbose: true });
        }
    }

    #[test]
    fn test_leveled_defaults() {
        let cli: LeveledCli = options(&["leveled"]);
        assert_eq!(cli.leveled.verbosity, None);
        assert_eq!(cli.leveled.logfile, None);
        assert_eq!(cli.name, None);
    }

    #[test]
    fn test_leveled_flags() {
        let cli: LeveledCli = options(&[
            "leveled",
            "-v",
            "DEBUG",
            "--logfile",
            "run.log",
            "--name",
            "x",
        ]);
        assert_eq!(
            cli.leveled.log_setup(),
            LogSetup::Leveled {
                verbosity: Some(Severity::Debug),
                logfile: Some(PathBuf::from("run.log")),
            }
        );
        assert_eq!(cli.name.as_deref(), Some("x"));
    }

    #[test]
    fn test_verbosity_is_case_insensitive() {
        let cli: LeveledCli = options(&["leveled", "--verbosity", "critical"]);
        assert_eq!(cli.leveled.verbosity, Some(Severity::Critical));
    }

    #[test]
    fn test_unknown_flag_requests_help() {
        let request = help::<LeveledCli>(&["leveled", "--bogus"]);
        assert!(request.text.contains("Usage"));
        assert!(request.text.contains("--verbosity"));
        assert!(request.reason.unwrap().contains("--bogus"));
    }

    #[test]
    fn test_invalid_level_requests_help() {
        let request = help::<LeveledCli>(&["leveled", "-v", "LOUD"]);
        assert!(request.text.contains("Usage"));
        assert!(request.reason.is_some());
    }

    #[test]
    fn test_help_flag_has_no_reason() {
        let request = help::<BasicCli>(&["script", "--help"]);
        assert!(request.text.contains("Be loud!"));
        assert!(request.reason.is_none());
    }
}
