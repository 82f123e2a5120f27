//! Core logic
//!
//! Leveled logging, run timing and settings resolution. Process-level
//! concerns (argument parsing, signals, exit codes) live in [`crate::cli`].

pub mod elapsed;
pub mod logger;
pub mod settings;
