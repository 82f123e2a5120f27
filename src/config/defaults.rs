//! Default configuration values

use crate::core::logger::Severity;

/// Minimum severity emitted when neither the CLI nor settings name one
pub const DEFAULT_VERBOSITY: Severity = Severity::Error;

/// Rotating log file size threshold in bytes
pub const DEFAULT_LOG_MAX_BYTES: u64 = 50_000;

/// Number of rotated log files kept next to the active one
pub const DEFAULT_LOG_BACKUPS: usize = 2;

/// Timestamp format for leveled log records
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format for the start and finish notices
pub const NOTICE_DATE_FORMAT: &str = "%d-%m-%Y at %H:%M:%S";

/// Process exit status after a user interrupt
pub const INTERRUPTED_EXIT_CODE: i32 = -1;

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
