//! Cooperative polling loop for the `monitor` command.
//!
//! Render a fresh pass, sleep a fixed interval, repeat until the stop
//! flag is set. Every frame is computed from scratch: no diffing, no
//! history between iterations. The flag is checked between iterations
//! and during the sleep (in short slices) so cancellation takes effect
//! promptly and tests can terminate the loop deterministically.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use fleet_common::constants::MONITOR_INTERVAL;
use fleet_common::error::Result;

/// Granularity of stop-flag checks during the inter-frame sleep.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// The monitor loop, bound to an explicit stop signal.
pub struct Monitor {
    interval: Duration,
    stop: Arc<AtomicBool>,
}

impl Monitor {
    /// Creates a monitor refreshing at the default interval.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(MONITOR_INTERVAL)
    }

    /// Creates a monitor with a custom refresh interval.
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared stop flag; setting it ends the loop at the next
    /// cancellation point.
    #[must_use]
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Runs `render` repeatedly until the stop flag is set.
    ///
    /// # Errors
    ///
    /// Propagates the first render failure; an interrupt during a
    /// render's backend calls is not specially handled.
    pub fn run<W, F>(&self, out: &mut W, mut render: F) -> Result<()>
    where
        W: Write,
        F: FnMut(&mut W) -> Result<()>,
    {
        while !self.stop.load(Ordering::Relaxed) {
            render(out)?;
            self.sleep_interruptibly();
        }
        Ok(())
    }

    fn sleep_interruptibly(&self) {
        let deadline = Instant::now() + self.interval;
        while Instant::now() < deadline && !self.stop.load(Ordering::Relaxed) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            std::thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}
