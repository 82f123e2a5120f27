//! Run timing
//!
//! Elapsed time is shown in whole hours, minutes and seconds. Runs shorter
//! than a second are reported as one second.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::config::defaults::NOTICE_DATE_FORMAT;

/// Wall-clock duration split for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    /// Total whole seconds represented
    pub fn total_seconds(self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl From<Duration> for Elapsed {
    fn from(duration: Duration) -> Self {
        let total = duration.as_secs().max(1);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours, {} minutes, {} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Start of a run
#[derive(Debug, Clone, Copy)]
pub struct RunTimer {
    started: Instant,
    started_at: DateTime<Local>,
}

impl RunTimer {
    /// Record the current instant and local date
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    /// Time since [`RunTimer::start`]
    pub fn elapsed(&self) -> Elapsed {
        self.started.elapsed().into()
    }

    /// Start date rendered for notices
    pub fn started_label(&self) -> String {
        self.started_at.format(NOTICE_DATE_FORMAT).to_string()
    }
}

/// Current local date rendered for notices
pub fn now_label() -> String {
    Local::now().format(NOTICE_DATE_FORMAT).to_string()
}
