//! scriptkit CLI - copy an input to an output under the run harness
//!
//! Entry point for the scriptkit command-line application.

use anyhow::Result;

use scriptkit::cli::harness::Harness;
use scriptkit::cli::Cli;

fn main() -> Result<()> {
    // Returning the error sets the exit status and prints the cause chain.
    Harness::new().run::<Cli, _>(Cli::execute)?;
    Ok(())
}
