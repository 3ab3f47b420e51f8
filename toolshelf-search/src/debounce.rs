//! Trailing-edge debounce as explicit state.
//!
//! The timer is just a pending value and a deadline. Nothing fires on its
//! own: the owner polls with the current time, or awaits
//! [`Debounce::fire`], which sleeps on the tokio clock and therefore follows
//! a paused test clock.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Delay applied when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Pending<V> {
    value: V,
    deadline: Instant,
}

/// Holds the latest value until it has been stable for `delay`.
#[derive(Debug)]
pub struct Debounce<V> {
    delay: Duration,
    pending: Option<Pending<V>>,
}

impl<V> Default for Debounce<V> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl<V> Debounce<V> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value`, superseding anything pending and restarting the
    /// delay from now.
    pub fn schedule(&mut self, value: V) {
        self.schedule_at(value, Instant::now());
    }

    /// Schedules `value` as if called at `now`.
    pub fn schedule_at(&mut self, value: V, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Returns true while a value is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be released.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Releases the pending value if its deadline has passed.
    pub fn poll(&mut self) -> Option<V> {
        self.poll_at(Instant::now())
    }

    /// Releases the pending value if its deadline is at or before `now`.
    pub fn poll_at(&mut self, now: Instant) -> Option<V> {
        if self.deadline().is_some_and(|deadline| deadline <= now) {
            self.flush()
        } else {
            None
        }
    }

    /// Releases the pending value immediately, deadline or not.
    pub fn flush(&mut self) -> Option<V> {
        self.pending.take().map(|p| p.value)
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Sleeps until the deadline, then releases the pending value.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn fire(&mut self) -> Option<V> {
        let deadline = self.deadline()?;
        sleep_until(deadline).await;
        self.poll_at(deadline)
    }
}
