//! # Scheduler configuration.
//!
//! Provides [`SchedulerConfig`] centralized settings for a scheduler and its driver.
//!
//! Config is used in three ways:
//! 1. **Scheduler creation**: `Scheduler::new(config)` / `Scheduler::builder(config)`
//! 2. **Manager defaults**: `Manager::with_defaults(name, &config)`
//! 3. **Driver pacing**: `Driver::new(&config)`
//!
//! ## Sentinel values
//! - `default_max_queued = 0` → managers collect without limit
//! - `tick_interval = 0s` → rounds run back-to-back (the driver yields between them)
//! - `max_ticks = 0` → the driver runs until cancelled

use std::time::Duration;

use crate::policies::{ClaimOrder, Distribution};

/// Configuration for a [`Scheduler`](crate::Scheduler) and its [`Driver`](crate::Driver).
///
/// ## Field semantics
/// - `claim_order`: which waiting worker the claim event serves first
/// - `default_max_queued`: private queue capacity for managers built with defaults (`0` = unlimited)
/// - `tick_interval`: delay between rounds when driven asynchronously (`0s` = no delay)
/// - `max_ticks`: stop the driver after this many rounds (`0` = unbounded)
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Claim order of the single-claim "job available" event.
    pub claim_order: ClaimOrder,

    /// Capacity given to managers created with `Manager::with_defaults`.
    pub default_max_queued: usize,

    /// Delay between two rounds in [`Driver::run`](crate::Driver::run).
    pub tick_interval: Duration,

    /// Maximum number of rounds per [`Driver::run`](crate::Driver::run) call.
    pub max_ticks: u64,
}

impl SchedulerConfig {
    /// Distribution bound to the claim event.
    #[inline]
    pub fn claim_distribution(&self) -> Distribution {
        Distribution::SingleClaim(self.claim_order)
    }

    /// Returns the round interval as an `Option`.
    ///
    /// - `None` → back-to-back rounds
    /// - `Some(d)` → one round every `d`
    #[inline]
    pub fn interval(&self) -> Option<Duration> {
        if self.tick_interval == Duration::ZERO {
            None
        } else {
            Some(self.tick_interval)
        }
    }

    /// Returns the round limit as an `Option`.
    #[inline]
    pub fn tick_limit(&self) -> Option<u64> {
        if self.max_ticks == 0 {
            None
        } else {
            Some(self.max_ticks)
        }
    }
}

impl Default for SchedulerConfig {
    /// Default configuration:
    ///
    /// - `claim_order = ClaimOrder::Newest` (last queued worker served first)
    /// - `default_max_queued = 1`
    /// - `tick_interval = 10ms`
    /// - `max_ticks = 0` (unbounded)
    fn default() -> Self {
        Self {
            claim_order: ClaimOrder::Newest,
            default_max_queued: 1,
            tick_interval: Duration::from_millis(10),
            max_ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let mut cfg = SchedulerConfig::default();
        assert_eq!(cfg.interval(), Some(Duration::from_millis(10)));
        assert_eq!(cfg.tick_limit(), None);

        cfg.tick_interval = Duration::ZERO;
        cfg.max_ticks = 3;
        assert_eq!(cfg.interval(), None);
        assert_eq!(cfg.tick_limit(), Some(3));
    }

    #[test]
    fn test_claim_distribution_follows_order() {
        let cfg = SchedulerConfig {
            claim_order: ClaimOrder::Oldest,
            ..SchedulerConfig::default()
        };
        assert_eq!(
            cfg.claim_distribution(),
            Distribution::SingleClaim(ClaimOrder::Oldest)
        );
    }
}
