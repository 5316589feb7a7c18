//! Single-slot debounce timer.
//!
//! A [`Debouncer`] holds at most one pending deadline. Scheduling replaces any
//! pending deadline, so a burst of triggers inside the quiet period fires once,
//! `quiet_period` after the last trigger.
//!
//! Time is read from [`tokio::time::Instant`] so a paused tokio clock drives it
//! deterministically in tests.

use tokio::time::{Duration, Instant};

/// Quiet period used for name filter updates.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Coalesces repeated triggers into one deferred action.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debouncer {
    /// Creates an idle debouncer.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedules the action `quiet_period` from now, replacing any pending deadline.
    pub fn schedule(&mut self) -> Instant {
        self.schedule_at(Instant::now())
    }

    /// Schedules the action `quiet_period` after `now`, replacing any pending deadline.
    pub fn schedule_at(&mut self, now: Instant) -> Instant {
        let deadline = now + self.quiet_period;
        self.deadline = Some(deadline);
        deadline
    }

    /// Drops the pending deadline. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consumes the pending deadline if it has passed at `now`.
    ///
    /// Returns true exactly once per scheduled deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Same as [`fire_if_due`](Self::fire_if_due) with the current time.
    pub fn poll(&mut self) -> bool {
        self.fire_if_due(Instant::now())
    }
}
