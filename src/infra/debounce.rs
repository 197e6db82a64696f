//! Single pending-timer debounce primitive.
//!
//! Watch mode coalesces bursts of file-change events into one reload: every
//! event re-arms the deadline, and the reload only fires once the quiet
//! period passes without another event. There is exactly one pending
//! deadline; arming again cancels and replaces it. The clock is passed in
//! so cancellation semantics are testable without sleeping.

use std::time::{Duration, Instant};

/// Default quiet period between the last event and the recompute.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the deadline at `now + quiet`. A pending deadline
    /// is replaced, never accumulated.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time remaining until the deadline, `None` when nothing is pending.
    /// Zero when the deadline has already passed.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume the deadline if it is due. Returns whether the caller
    /// should recompute now.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}
