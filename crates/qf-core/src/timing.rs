//! Lightweight performance timing utilities.
//!
//! Timing is off unless enabled programmatically or through the
//! `QF_TIMING` environment variable.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable performance timing globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("QF_TIMING").is_ok()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
    enabled: bool,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        if self.enabled {
            Some(self.start.elapsed().as_secs_f64())
        } else {
            None
        }
    }

    /// Stop the timer and print the result to stderr if enabled, keeping
    /// stdout free for command output.
    pub fn stop_and_print(self) {
        // Timing output is best-effort.
        let _ = self.stop_and_write(&mut io::stderr().lock());
    }

    /// Stop the timer and write a `[TIMING]` line to `out` if enabled.
    pub fn stop_and_write<W: Write>(self, out: &mut W) -> io::Result<()> {
        let label = self.label;
        if let Some(elapsed) = self.stop() {
            writeln!(out, "[TIMING] {}: {:.6}s", label, elapsed)?;
        }
        Ok(())
    }
}
