//! # Work item: the unit dispatched from managers to workers.
//!
//! A [`WorkItem`] has a name, a fixed duration, and an optional start instant.
//! It is *done* once it has been started and its duration has elapsed.
//!
//! ## Rules
//! - The duration is fixed at construction; negative or non-finite values are clamped to zero.
//! - [`WorkItem::start`] should be called once per item. Calling it again overwrites
//!   the start instant; this is a caller contract and is not checked.
//! - [`WorkItem::is_done`] is `false` until the item has been started.
//!
//! ## Example
//! ```rust
//! use std::time::{Duration, Instant};
//! use jobvisor::WorkItem;
//!
//! let mut item = WorkItem::new("render", 0.5);
//! assert!(!item.is_done());
//!
//! let t0 = Instant::now();
//! item.start_at(t0);
//! assert!(!item.is_done_at(t0 + Duration::from_millis(100)));
//! assert!(item.is_done_at(t0 + Duration::from_millis(500)));
//! ```

use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;

/// Range of durations (seconds) drawn by [`WorkItem::random`].
pub const RANDOM_DURATION_SECS: Range<f64> = 0.02..0.2;

/// An atomic unit of work with a fixed duration.
#[derive(Clone, Debug)]
pub struct WorkItem {
    name: Arc<str>,
    duration: Duration,
    started_at: Option<Instant>,
}

impl WorkItem {
    /// Creates a new item taking `duration_secs` seconds to complete.
    ///
    /// Negative, `NaN` and infinite durations are normalized to zero; finite
    /// values beyond [`Duration::MAX`] saturate to it.
    pub fn new(name: impl Into<Arc<str>>, duration_secs: f64) -> Self {
        let duration = if duration_secs.is_finite() && duration_secs > 0.0 {
            Duration::try_from_secs_f64(duration_secs).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self::with_duration(name, duration)
    }

    /// Creates a new item from an exact [`Duration`].
    pub fn with_duration(name: impl Into<Arc<str>>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
            started_at: None,
        }
    }

    /// Creates an item whose duration is drawn uniformly from [`RANDOM_DURATION_SECS`].
    pub fn random<R: Rng + ?Sized>(name: impl Into<Arc<str>>, rng: &mut R) -> Self {
        Self::new(name, rng.random_range(RANDOM_DURATION_SECS))
    }

    /// Returns the item name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fixed duration (the "estimated time" reported by workers).
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the instant the item was started, if any.
    #[inline]
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Records the current instant as the start time.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Records `now` as the start time.
    pub fn start_at(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    /// Returns `true` once started and the duration has elapsed.
    pub fn is_done(&self) -> bool {
        self.is_done_at(Instant::now())
    }

    /// Same as [`is_done`](Self::is_done), evaluated at `now`.
    pub fn is_done_at(&self, now: Instant) -> bool {
        match self.started_at {
            Some(start) => now.saturating_duration_since(start) >= self.duration,
            None => false,
        }
    }

    /// Time left before the item is done, evaluated at `now`.
    ///
    /// Returns `None` if the item has not been started.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.started_at
            .map(|start| self.duration.saturating_sub(now.saturating_duration_since(start)))
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_duration_is_clamped() {
        let item = WorkItem::new("neg", -3.0);
        assert_eq!(item.duration(), Duration::ZERO);

        let item = WorkItem::new("nan", f64::NAN);
        assert_eq!(item.duration(), Duration::ZERO);
    }

    #[test]
    fn test_oversized_duration_saturates() {
        let mut item = WorkItem::new("huge", 1e20);
        assert_eq!(item.duration(), Duration::MAX);

        let now = Instant::now();
        item.start_at(now);
        assert!(!item.is_done_at(now));
        assert!(item.remaining_at(now).is_some());
    }

    #[test]
    fn test_not_done_before_start() {
        let item = WorkItem::new("idle", 0.0);
        assert!(!item.is_done(), "an unstarted item is never done");
        assert!(item.remaining_at(Instant::now()).is_none());
    }

    #[test]
    fn test_zero_duration_done_immediately() {
        let mut item = WorkItem::new("instant", 0.0);
        item.start();
        assert!(item.is_done());
    }

    #[test]
    fn test_done_after_duration_elapsed() {
        let mut item = WorkItem::with_duration("slow", Duration::from_secs(2));
        let t0 = Instant::now();
        item.start_at(t0);

        assert!(!item.is_done_at(t0 + Duration::from_secs(1)));
        assert_eq!(item.remaining_at(t0 + Duration::from_secs(1)), Some(Duration::from_secs(1)));
        assert!(item.is_done_at(t0 + Duration::from_secs(2)));
        assert_eq!(item.remaining_at(t0 + Duration::from_secs(5)), Some(Duration::ZERO));
    }

    #[test]
    fn test_restart_overwrites_start() {
        let mut item = WorkItem::with_duration("again", Duration::from_secs(2));
        let t0 = Instant::now();
        item.start_at(t0);
        item.start_at(t0 + Duration::from_secs(10));
        assert!(!item.is_done_at(t0 + Duration::from_secs(11)));
    }

    #[test]
    fn test_random_duration_in_range() {
        let mut rng = rand::rng();
        for i in 0..100 {
            let item = WorkItem::random(format!("job {i}"), &mut rng);
            let secs = item.duration().as_secs_f64();
            // nanosecond rounding may land exactly on the upper bound
            assert!(
                (RANDOM_DURATION_SECS.start..=RANDOM_DURATION_SECS.end).contains(&secs),
                "duration {secs} outside {RANDOM_DURATION_SECS:?}"
            );
        }
    }
}
