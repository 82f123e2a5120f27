//! Interrupt watcher
//!
//! A background thread blocks on SIGINT. When the signal arrives it runs the
//! supplied handler, which is expected to report and exit the process.
//! Dropping the guard closes the signal iterator and joins the thread.

use std::io;
use std::thread::{self, JoinHandle};

use signal_hook::consts::signal::SIGINT;
use signal_hook::iterator::{Handle, Signals};

/// Keeps the interrupt watcher alive
#[derive(Debug)]
pub struct InterruptGuard {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl InterruptGuard {
    /// Start watching for SIGINT
    pub fn install<F>(on_interrupt: F) -> io::Result<Self>
    where
        F: FnOnce(i32) + Send + 'static,
    {
        let mut signals = Signals::new([SIGINT])?;
        let handle = signals.handle();
        let thread = thread::Builder::new()
            .name("interrupt-watcher".to_string())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    tracing::debug!(signal, "interrupt received");
                    on_interrupt(signal);
                }
            })?;

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
