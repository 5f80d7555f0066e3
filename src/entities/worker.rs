//! # Worker: consumes work items handed out by the claim event.
//!
//! ## State machine
//! ```text
//!            join claim event                 claimed by a manager
//!   Idle ───────────────────────► Waiting ─────────────────────────► Busy
//!    ▲                                                                 │
//!    └──────────────────── current item done ──────────────────────────┘
//! ```
//!
//! ## Round behavior
//! 1. Busy and the current item is done → drop the item → `Idle`.
//! 2. Idle (including just freed) and not subscribed → join the claim event → `Waiting`.
//! 3. Chosen by the claim event → store and start the item → `Busy`.
//!
//! A worker freed in step 1 queues again in the same round, so it can be
//! served by a manager that updates after it.

use std::sync::Arc;

use crate::core::Context;
use crate::entities::{Updatable, Workable};
use crate::events::NoticeKind;
use crate::work::WorkItem;

/// Observable state of a [`Worker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// No item, not subscribed to the claim event.
    Idle,
    /// No item, subscribed to the claim event.
    Waiting,
    /// Working on an item.
    Busy,
}

/// Consumer entity.
#[derive(Debug)]
pub struct Worker {
    name: Arc<str>,
    current: Option<WorkItem>,
    waiting: bool,
    completed: u64,
}

impl Worker {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            current: None,
            waiting: false,
            completed: 0,
        }
    }

    /// Item currently worked on.
    #[inline]
    pub fn current(&self) -> Option<&WorkItem> {
        self.current.as_ref()
    }

    /// Number of items this worker has finished.
    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn state(&self) -> WorkerState {
        match (&self.current, self.waiting) {
            (Some(_), _) => WorkerState::Busy,
            (None, true) => WorkerState::Waiting,
            (None, false) => WorkerState::Idle,
        }
    }

    fn finish_if_done(&mut self, ctx: &mut Context<'_>) {
        let now = ctx.now();
        if !self.current.as_ref().is_some_and(|item| item.is_done_at(now)) {
            return;
        }
        if let Some(item) = self.current.take() {
            self.completed += 1;
            ctx.emit(NoticeKind::WorkFinished {
                worker: Arc::clone(&self.name),
                item: Arc::from(item.name()),
            });
        }
    }

    fn queue_for_work(&mut self, ctx: &mut Context<'_>) {
        if self.current.is_some() {
            return;
        }
        if ctx.join_claim() {
            ctx.emit(NoticeKind::WorkerQueued {
                worker: Arc::clone(&self.name),
            });
        }
        self.waiting = ctx.is_waiting();
    }
}

impl Updatable for Worker {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &mut Context<'_>) {
        self.waiting = ctx.is_waiting();
        self.finish_if_done(ctx);
        self.queue_for_work(ctx);
    }

    fn as_workable(&mut self) -> Option<&mut dyn Workable> {
        Some(self)
    }
}

impl Workable for Worker {
    fn work_on(&mut self, mut item: WorkItem, ctx: &mut Context<'_>) {
        item.start_at(ctx.now());
        ctx.emit(NoticeKind::WorkStarted {
            worker: Arc::clone(&self.name),
            item: Arc::from(item.name()),
            estimated: item.duration(),
        });
        self.current = Some(item);
        self.waiting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Recorder, Scheduler, SchedulerConfig};
    use std::time::Duration;

    fn scheduler() -> (Scheduler, Recorder) {
        let rec = Recorder::new();
        let s = Scheduler::builder(SchedulerConfig::default())
            .with_sink(rec.clone())
            .build();
        (s, rec)
    }

    #[test]
    fn test_idle_worker_queues_once() {
        let (mut s, rec) = scheduler();
        let w = s.add(Worker::new("w"));

        s.tick();
        s.tick();

        assert_eq!(s.waiting(), [w]);
        assert_eq!(rec.messages(), ["w queued for a job"], "queued notice only on join");
        assert_eq!(s.entity::<Worker>(w).map(Worker::state), Ok(WorkerState::Waiting));
    }

    #[test]
    fn test_claimed_worker_is_busy_and_unsubscribed() {
        let (mut s, rec) = scheduler();
        let w = s.add(Worker::new("w"));
        s.tick();

        assert!(s.offer(WorkItem::with_duration("long", Duration::from_secs(3600))).is_ok());
        assert!(s.waiting().is_empty());

        s.tick();
        let worker = s.entity::<Worker>(w).expect("worker");
        assert_eq!(worker.state(), WorkerState::Busy);
        assert_eq!(worker.current().map(WorkItem::name), Some("long"));
        assert!(worker.current().and_then(WorkItem::started_at).is_some());
        assert!(s.waiting().is_empty(), "busy worker stays off the claim event");
        assert_eq!(rec.labels(), ["worker_queued", "work_started"]);
    }

    #[test]
    fn test_finished_worker_requeues_same_round() {
        let (mut s, rec) = scheduler();
        let w = s.add(Worker::new("w"));
        s.tick();
        assert!(s.offer(WorkItem::new("quick", 0.0)).is_ok());

        s.tick();

        let worker = s.entity::<Worker>(w).expect("worker");
        assert_eq!(worker.state(), WorkerState::Waiting);
        assert_eq!(worker.completed(), 1);
        assert_eq!(
            rec.labels(),
            ["worker_queued", "work_started", "work_finished", "worker_queued"]
        );
    }
}
