//! Search input debounce.

use std::time::{Duration, Instant};

/// Default delay between the last keystroke and the query.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds at most one pending value and the instant it becomes due.
///
/// Each [`push`](Debouncer::push) replaces the pending value and pushes
/// the deadline out again, so a burst of input fires once with its final
/// value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    /// Quiet period required before firing.
    delay: Duration,
    /// Pending value and its due instant.
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Creates an empty debouncer.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `value` one delay after `now`, replacing any pending value.
    pub fn push(&mut self, value: T, now: Instant) {
        let due = now.checked_add(self.delay).unwrap_or(now);
        self.pending = Some((value, due));
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, due)) if now >= due => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
