//! # Async driver: runs rounds on a timer until told to stop.
//!
//! The [`Scheduler`] itself is synchronous; the [`Driver`] paces it.
//!
//! ```text
//! loop {
//!   ├─► stop if token cancelled or max_ticks reached
//!   ├─► wait: interval.tick()  |  yield_now() when tick_interval = 0
//!   │         (cancellation wins over a ready tick)
//!   └─► scheduler.tick()
//! }
//! ```
//!
//! ## Rules
//! - A round is never interrupted: cancellation is only observed between rounds.
//! - Late ticks are delayed, not bursted ([`MissedTickBehavior::Delay`]).

use std::time::Duration;

use tokio::time::{self, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::core::shutdown::wait_for_shutdown_signal;
use crate::core::{Scheduler, SchedulerConfig};
use crate::error::RuntimeError;

/// Paces a [`Scheduler`] from async code.
#[derive(Clone, Debug)]
pub struct Driver {
    interval: Option<Duration>,
    max_ticks: Option<u64>,
}

impl Driver {
    /// Takes pacing and tick limit from the config.
    pub fn new(cfg: &SchedulerConfig) -> Self {
        Self {
            interval: cfg.interval(),
            max_ticks: cfg.tick_limit(),
        }
    }

    /// Runs rounds until `token` is cancelled or the tick limit is reached.
    ///
    /// Returns the number of rounds run by this call.
    pub async fn run(&self, scheduler: &mut Scheduler, token: CancellationToken) -> u64 {
        let mut ticker = self.interval.map(ticker);
        let mut ran = 0u64;

        loop {
            if token.is_cancelled() || self.max_ticks.is_some_and(|limit| ran >= limit) {
                break;
            }

            let stopped = match ticker.as_mut() {
                Some(interval) => tokio::select! {
                    biased;
                    _ = token.cancelled() => true,
                    _ = interval.tick() => false,
                },
                None => tokio::select! {
                    biased;
                    _ = token.cancelled() => true,
                    _ = tokio::task::yield_now() => false,
                },
            };
            if stopped {
                break;
            }

            scheduler.tick();
            ran += 1;
        }

        tracing::debug!(ticks = ran, total = scheduler.ticks(), "driver stopped");
        ran
    }

    /// Runs rounds until a termination signal arrives or the tick limit is reached.
    ///
    /// # Errors
    /// [`RuntimeError::Signal`] if signal listeners cannot be registered.
    pub async fn run_until_signal(&self, scheduler: &mut Scheduler) -> Result<u64, RuntimeError> {
        let before = scheduler.ticks();
        tokio::select! {
            biased;
            res = wait_for_shutdown_signal() => res?,
            _ = self.run(scheduler, CancellationToken::new()) => {},
        }
        Ok(scheduler.ticks() - before)
    }
}

fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, Recorder, Updatable, Worker};
    use std::cell::Cell;
    use std::rc::Rc;

    fn quiet(cfg: SchedulerConfig) -> Scheduler {
        Scheduler::builder(cfg).with_sink(Recorder::new()).build()
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_at_tick_limit() {
        let cfg = SchedulerConfig {
            max_ticks: 3,
            ..SchedulerConfig::default()
        };
        let mut s = quiet(cfg.clone());
        s.add(Worker::new("w"));

        let ran = Driver::new(&cfg).run(&mut s, CancellationToken::new()).await;
        assert_eq!(ran, 3);
        assert_eq!(s.ticks(), 3);
    }

    /// Shares its round count through an `Rc`, so it is not `Send`.
    struct LocalCounter {
        rounds: Rc<Cell<u32>>,
    }

    impl Updatable for LocalCounter {
        fn name(&self) -> &str {
            "local"
        }

        fn update(&mut self, _ctx: &mut Context<'_>) {
            self.rounds.set(self.rounds.get() + 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_drives_entities_that_are_not_send() {
        let cfg = SchedulerConfig {
            max_ticks: 4,
            ..SchedulerConfig::default()
        };
        let rounds = Rc::new(Cell::new(0));
        let mut s = quiet(cfg.clone());
        s.add(LocalCounter {
            rounds: Rc::clone(&rounds),
        });

        assert_eq!(Driver::new(&cfg).run(&mut s, CancellationToken::new()).await, 4);
        assert_eq!(rounds.get(), 4);
    }

    #[tokio::test]
    async fn test_cancelled_token_runs_nothing() {
        let cfg = SchedulerConfig::default();
        let mut s = quiet(cfg.clone());
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(Driver::new(&cfg).run(&mut s, token).await, 0);
        assert_eq!(s.ticks(), 0);
    }

    #[tokio::test]
    async fn test_zero_interval_runs_back_to_back() {
        let cfg = SchedulerConfig {
            tick_interval: Duration::ZERO,
            max_ticks: 50,
            ..SchedulerConfig::default()
        };
        let mut s = quiet(cfg.clone());

        assert_eq!(Driver::new(&cfg).run(&mut s, CancellationToken::new()).await, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_between_rounds() {
        let cfg = SchedulerConfig {
            tick_interval: Duration::from_millis(10),
            ..SchedulerConfig::default()
        };
        let mut s = quiet(cfg.clone());
        let token = CancellationToken::new();

        let stopper = {
            let token = token.clone();
            tokio::spawn(async move {
                time::sleep(Duration::from_millis(45)).await;
                token.cancel();
            })
        };

        let ran = Driver::new(&cfg).run(&mut s, token).await;
        let _ = stopper.await;
        // ticks at t = 0, 10, 20, 30, 40
        assert_eq!(ran, 5);
    }
}
