//! # Status notices emitted by the scheduler and its entities.
//!
//! [`NoticeKind`] classifies what happened during a round; [`Notice`] adds the
//! sequence number and the time elapsed since the scheduler was created.
//!
//! ## Rendering
//! `Display` produces the human-readable status line:
//! ```text
//! Time: 0.00s | Steve (w) queued for a job
//! Time: 0.00s | Irene (M) collected Job nr 4 | jobs to dispose: [Job nr 4]
//! Time: 0.00s | Steve (w) started working on Job nr 4 (estimated time: 0.13s)
//! Time: 0.00s | Irene (M) disposed Job nr 4 successfully to Steve (w)
//! Time: 0.00s | Irene (M) moved to the end of the queue
//! Time: 0.13s | Steve (w) finished Job nr 4
//! ```
//!
//! ## Ordering guarantees
//! `seq` increases by one per notice within a scheduler; sinks that reorder
//! notices (e.g. async subscribers) can use it to restore emission order.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Work items were added to the shared pool.
    PoolLoaded {
        /// Number of items added.
        count: usize,
        /// Pool size after loading.
        pending: usize,
    },

    /// An idle worker subscribed to the claim event.
    WorkerQueued { worker: Arc<str> },

    /// A worker received an item and started it.
    WorkStarted {
        worker: Arc<str>,
        item: Arc<str>,
        /// The item's fixed duration.
        estimated: Duration,
    },

    /// A worker's current item completed; the worker is idle again.
    WorkFinished { worker: Arc<str>, item: Arc<str> },

    /// A manager moved an item from the shared pool into its private queue.
    ItemCollected {
        manager: Arc<str>,
        item: Arc<str>,
        /// Private queue contents after collecting, head first.
        queue: Vec<Arc<str>>,
    },

    /// A manager handed its head item to a waiting worker.
    ItemDisposed {
        manager: Arc<str>,
        item: Arc<str>,
        worker: Arc<str>,
    },

    /// A manager that disposed this round moved to the end of the update order.
    ManagerRequeued { manager: Arc<str> },
}

impl NoticeKind {
    /// Name of the entity the notice is about, if any.
    pub fn entity(&self) -> Option<&str> {
        match self {
            NoticeKind::PoolLoaded { .. } => None,
            NoticeKind::WorkerQueued { worker }
            | NoticeKind::WorkStarted { worker, .. }
            | NoticeKind::WorkFinished { worker, .. } => Some(worker),
            NoticeKind::ItemCollected { manager, .. }
            | NoticeKind::ItemDisposed { manager, .. }
            | NoticeKind::ManagerRequeued { manager } => Some(manager),
        }
    }

    /// Short stable label (snake_case) for logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            NoticeKind::PoolLoaded { .. } => "pool_loaded",
            NoticeKind::WorkerQueued { .. } => "worker_queued",
            NoticeKind::WorkStarted { .. } => "work_started",
            NoticeKind::WorkFinished { .. } => "work_finished",
            NoticeKind::ItemCollected { .. } => "item_collected",
            NoticeKind::ItemDisposed { .. } => "item_disposed",
            NoticeKind::ManagerRequeued { .. } => "manager_requeued",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::PoolLoaded { count, pending } => {
                write!(f, "loaded {count} jobs | pending: {pending}")
            }
            NoticeKind::WorkerQueued { worker } => write!(f, "{worker} queued for a job"),
            NoticeKind::WorkStarted {
                worker,
                item,
                estimated,
            } => write!(
                f,
                "{worker} started working on {item} (estimated time: {:.2}s)",
                estimated.as_secs_f64()
            ),
            NoticeKind::WorkFinished { worker, item } => write!(f, "{worker} finished {item}"),
            NoticeKind::ItemCollected {
                manager,
                item,
                queue,
            } => {
                write!(f, "{manager} collected {item} | jobs to dispose: [")?;
                for (i, queued) in queue.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(queued)?;
                }
                f.write_str("]")
            }
            NoticeKind::ItemDisposed {
                manager,
                item,
                worker,
            } => write!(f, "{manager} disposed {item} successfully to {worker}"),
            NoticeKind::ManagerRequeued { manager } => {
                write!(f, "{manager} moved to the end of the queue")
            }
        }
    }
}

/// A status notification with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Per-scheduler sequence number, starting at 0.
    pub seq: u64,
    /// Time since the scheduler was created.
    pub elapsed: Duration,
    /// What happened.
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(seq: u64, elapsed: Duration, kind: NoticeKind) -> Self {
        Self { seq, elapsed, kind }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time: {:.2}s | {}", self.elapsed.as_secs_f64(), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_collected_lists_queue() {
        let n = Notice::new(
            0,
            Duration::from_millis(1234),
            NoticeKind::ItemCollected {
                manager: "Clark (M)".into(),
                item: "Job nr 3".into(),
                queue: vec!["Job nr 4".into(), "Job nr 3".into()],
            },
        );
        assert_eq!(
            n.to_string(),
            "Time: 1.23s | Clark (M) collected Job nr 3 | jobs to dispose: [Job nr 4, Job nr 3]"
        );
    }

    #[test]
    fn test_render_started_with_estimate() {
        let kind = NoticeKind::WorkStarted {
            worker: "Steve (w)".into(),
            item: "Job nr 1".into(),
            estimated: Duration::from_millis(130),
        };
        assert_eq!(
            kind.to_string(),
            "Steve (w) started working on Job nr 1 (estimated time: 0.13s)"
        );
        assert_eq!(kind.entity(), Some("Steve (w)"));
        assert_eq!(kind.as_label(), "work_started");
    }

    #[test]
    fn test_pool_loaded_has_no_entity() {
        let kind = NoticeKind::PoolLoaded {
            count: 5,
            pending: 5,
        };
        assert_eq!(kind.entity(), None);
        assert_eq!(kind.to_string(), "loaded 5 jobs | pending: 5");
    }
}
