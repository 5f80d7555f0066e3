//! # Notice sinks.
//!
//! A [`Sink`] receives every [`Notice`] synchronously, while the round that
//! produced it is still running. Sinks must return quickly; anything slow
//! belongs behind a [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Built-in sinks
//! - [`TracingSink`] logs each notice with `tracing::info!` (default when nothing else is configured)
//! - [`Recorder`] keeps notices in memory; cheap to clone, every clone sees the same log

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::events::Notice;

/// Synchronous receiver of status notices.
pub trait Sink: Send + 'static {
    /// Handles one notice.
    fn emit(&self, notice: &Notice);

    /// Returns the sink name used in diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Logs notices through `tracing` at `INFO`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, notice: &Notice) {
        tracing::info!(
            seq = notice.seq,
            elapsed_ms = elapsed_ms(notice.elapsed),
            entity = notice.kind.entity().unwrap_or("-"),
            kind = notice.kind.as_label(),
            "{}",
            notice.kind
        );
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}

/// Milliseconds as a `u64` field value, saturating.
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// In-memory notice log.
///
/// ```rust
/// use jobvisor::{Recorder, Scheduler, SchedulerConfig, Worker};
///
/// let recorder = Recorder::new();
/// let mut scheduler = Scheduler::builder(SchedulerConfig::default())
///     .with_sink(recorder.clone())
///     .build();
///
/// scheduler.add(Worker::new("Steve (w)"));
/// scheduler.tick();
/// assert_eq!(recorder.messages(), ["Steve (w) queued for a job"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices recorded so far, in emission order.
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    /// Rendered notice kinds (without the time prefix).
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.kind.to_string()).collect()
    }

    /// Notice labels, see [`NoticeKind::as_label`](crate::NoticeKind::as_label).
    pub fn labels(&self) -> Vec<&'static str> {
        self.lock().iter().map(|n| n.kind.as_label()).collect()
    }

    /// Returns the recorded notices and clears the log.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notice>> {
        // a panicking sink elsewhere must not hide what was recorded
        self.notices.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Sink for Recorder {
    fn emit(&self, notice: &Notice) {
        self.lock().push(notice.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoticeKind;

    fn queued(seq: u64, worker: &str) -> Notice {
        Notice::new(
            seq,
            Duration::ZERO,
            NoticeKind::WorkerQueued {
                worker: worker.into(),
            },
        )
    }

    #[test]
    fn test_elapsed_ms_saturates() {
        assert_eq!(elapsed_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(elapsed_ms(Duration::MAX), u64::MAX);

        let mut notice = queued(0, "a");
        notice.elapsed = Duration::MAX;
        TracingSink.emit(&notice);
    }

    #[test]
    fn test_recorder_clones_share_log() {
        let rec = Recorder::new();
        let clone = rec.clone();
        clone.emit(&queued(0, "a"));
        clone.emit(&queued(1, "b"));

        assert_eq!(rec.len(), 2);
        assert_eq!(rec.messages(), ["a queued for a job", "b queued for a job"]);
        assert_eq!(rec.labels(), ["worker_queued", "worker_queued"]);
    }

    #[test]
    fn test_recorder_drain_clears() {
        let rec = Recorder::new();
        rec.emit(&queued(0, "a"));
        let drained = rec.drain();
        assert_eq!(drained.len(), 1);
        assert!(rec.is_empty());
    }
}
