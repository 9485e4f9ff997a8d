//! Pacing between consecutive queries.
//!
//! The public APIs throttle aggressive clients, so the demo pauses between
//! calls. The pause is a collaborator rather than an inline sleep so tests
//! can run the whole sequence instantly.

use std::thread;
use std::time::Duration;

use tracing::trace;

pub trait Pacer {
    /// Block until the next request may be sent.
    fn pause(&self);
}

/// Sleeps for the same duration every time.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Pacer for FixedDelay {
    fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        trace!(delay_ms = self.delay.as_millis() as u64, "pausing between queries");
        thread::sleep(self.delay);
    }
}
