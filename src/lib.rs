//! scriptkit - Bootstrap skeleton for one-shot command-line scripts
//!
//! Provides the pieces every throwaway script ends up rewriting: option
//! parsing with help-and-exit, colored or leveled logging to stderr (with an
//! optional rotating log file), stream-agnostic file access, and a run
//! harness that times the main routine and handles failure and interrupts.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing, status output and the run harness
//! - [`core`] - Leveled logger, run timing and settings
//! - [`infra`] - Standard streams, rotating files, signals, directories
//! - [`config`] - Constants
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use scriptkit::cli::args::{BasicArgs, LogSetup, ScriptArgs};
//! use scriptkit::cli::harness::Harness;
//! use scriptkit::cli::output::StatusLog;
//!
//! #[derive(Parser, Debug)]
//! struct Options {
//!     #[command(flatten)]
//!     basic: BasicArgs,
//! }
//!
//! impl ScriptArgs for Options {
//!     fn log_setup(&self) -> LogSetup {
//!         self.basic.log_setup()
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     Harness::new().run::<Options, _>(|ctx| {
//!         ctx.console().info("doing the work");
//!         Ok(())
//!     })?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
