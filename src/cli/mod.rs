//! Command-line interface module
//!
//! Argument parsing, console output and the run harness. [`Cli`] is the
//! filled-in example script shipped as the `scriptkit` binary: it copies an
//! input to an output, either of which may be a standard stream.

pub mod args;
pub mod harness;
pub mod output;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;

use args::{LeveledArgs, LogSetup, ScriptArgs};
use harness::Context;

use crate::infra::stream::{with_stream, Mode, Target};

/// Copy an input to an output byte for byte
///
/// Both default to the standard streams (`-`), so the command works as a
/// filter in a pipeline. Status messages go to stderr only.
#[derive(Parser, Debug)]
#[command(name = "scriptkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub logging: LeveledArgs,

    /// Settings file
    #[arg(long, env = "SCRIPTKIT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Input file, `-` for standard input
    #[arg(short, long, default_value = "-", value_name = "PATH")]
    pub input: PathBuf,

    /// Output file, `-` for standard output
    #[arg(short, long, default_value = "-", value_name = "PATH")]
    pub output: PathBuf,
}

impl ScriptArgs for Cli {
    fn log_setup(&self) -> LogSetup {
        self.logging.log_setup()
    }

    fn settings_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

impl Cli {
    /// Main routine run by the harness
    pub fn execute(ctx: &Context<Self>) -> Result<()> {
        let options = ctx.options();
        let input = Target::reader(&options.input);
        let output = Target::writer(&options.output);
        tracing::debug!(source = %input, destination = %output, "copying input");

        let copied = with_stream(&input, Mode::Read, |reader| {
            Ok(with_stream(&output, Mode::Write, |writer| {
                io::copy(reader, writer)
            }))
        })
        .with_context(|| format!("Failed to read {input}"))?;

        let bytes = match copied {
            Some(written) => written
                .with_context(|| format!("Failed to copy {input} to {output}"))?
                .unwrap_or_default(),
            None => 0,
        };
        tracing::info!(bytes, destination = %output, "copied input");

        Ok(())
    }
}
