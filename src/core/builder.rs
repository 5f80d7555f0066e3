//! # Builder for a [`Scheduler`] with custom sinks and subscribers.
//!
//! ```text
//! SchedulerBuilder::new(cfg)
//!     .with_sink(Recorder)            (synchronous, in-round)
//!     .with_subscribers(vec![...])    (async, per-subscriber queues)
//!     .build()  ──►  Scheduler
//! ```
//!
//! ## Rules
//! - With no sink and no subscriber configured, notices go to [`TracingSink`].
//! - Subscribers need a running Tokio runtime at `build()` time.

use std::sync::Arc;

use crate::core::{Scheduler, SchedulerConfig};
use crate::subscribers::{Sink, Subscribe, SubscriberSet, TracingSink};

/// Builder for constructing a [`Scheduler`] with optional observers.
pub struct SchedulerBuilder {
    cfg: SchedulerConfig,
    sinks: Vec<Box<dyn Sink>>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SchedulerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self {
            cfg,
            sinks: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Adds a synchronous sink. Sinks are called in the order they were added.
    pub fn with_sink(mut self, sink: impl Sink) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Sets async subscribers.
    ///
    /// Each subscriber gets a dedicated worker task with a bounded queue
    /// sized by [`Subscribe::queue_capacity`].
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the scheduler.
    ///
    /// # Panics
    /// If subscribers were configured and no Tokio runtime is running.
    pub fn build(self) -> Scheduler {
        let mut sinks = self.sinks;
        let fanout = if self.subscribers.is_empty() {
            None
        } else {
            Some(SubscriberSet::new(self.subscribers))
        };
        if sinks.is_empty() && fanout.is_none() {
            sinks.push(Box::new(TracingSink));
        }
        Scheduler::from_parts(self.cfg, sinks, fanout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Recorder, Worker};

    #[test]
    fn test_sinks_receive_in_order() {
        let first = Recorder::new();
        let second = Recorder::new();
        let mut s = SchedulerBuilder::new(SchedulerConfig::default())
            .with_sink(first.clone())
            .with_sink(second.clone())
            .build();

        s.add(Worker::new("w"));
        s.tick();

        assert_eq!(first.messages(), ["w queued for a job"]);
        assert_eq!(second.messages(), first.messages());
    }

    #[test]
    fn test_default_build_has_no_entities() {
        let s = SchedulerBuilder::new(SchedulerConfig::default()).build();
        assert!(s.is_empty());
        assert_eq!(s.ticks(), 0);
    }
}
