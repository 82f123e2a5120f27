//! Infrastructure layer
//!
//! Filesystem and process-level plumbing: standard stream resolution,
//! rotating log files, signal handling and directory lookup.

pub mod dirs;
pub mod interrupt;
pub mod rotating;
pub mod stream;
