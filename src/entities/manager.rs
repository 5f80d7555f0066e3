//! # Manager: brokers items from the shared pool to waiting workers.
//!
//! Every round a manager runs two independent steps during update, and a
//! fairness step during after-update.
//!
//! ## Round behavior
//! ```text
//! update:
//!   collect  pool non-empty && (max_queued == 0 || queue.len() < max_queued)
//!              └─► pop newest pool item, push to queue tail, emit ItemCollected
//!   dispose  queue non-empty
//!              └─► offer queue head on the claim event
//!                    ├─ claimed   → pop head, mark disposed, emit ItemDisposed
//!                    └─ unclaimed → queue untouched
//! after_update:
//!   disposed this round → move to the end of the update order, clear flag, emit ManagerRequeued
//! ```
//!
//! ## Fairness
//! Managers compete for the same waiting workers in update order. A manager
//! that handed out an item yields its position, so a manager that did not
//! dispose is served first when both are eligible in the next round.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::core::{Context, SchedulerConfig};
use crate::entities::Updatable;
use crate::events::NoticeKind;
use crate::work::WorkItem;

/// Producer/broker entity.
#[derive(Debug)]
pub struct Manager {
    name: Arc<str>,
    queue: VecDeque<WorkItem>,
    max_queued: usize,
    disposed: bool,
    dispatched: u64,
}

impl Manager {
    /// Creates a manager with capacity 1.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            queue: VecDeque::new(),
            max_queued: 1,
            disposed: false,
            dispatched: 0,
        }
    }

    /// Creates a manager with `cfg.default_max_queued` capacity.
    pub fn with_defaults(name: impl Into<Arc<str>>, cfg: &SchedulerConfig) -> Self {
        let mut manager = Self::new(name);
        manager.max_queued = cfg.default_max_queued;
        manager
    }

    /// Builder-style capacity setter, see [`set_max_queued`](Self::set_max_queued).
    #[must_use]
    pub fn with_max_queued(mut self, value: i64) -> Self {
        self.set_max_queued(value);
        self
    }

    /// Maximum number of items to hold in the private queue (`0` = no limit).
    #[inline]
    pub fn max_queued(&self) -> usize {
        self.max_queued
    }

    /// Sets the queue capacity; negative values are clamped to `0` (no limit).
    pub fn set_max_queued(&mut self, value: i64) {
        self.max_queued = usize::try_from(value.max(0)).unwrap_or(usize::MAX);
    }

    /// Items collected but not yet handed out, head first.
    pub fn queue(&self) -> impl ExactSizeIterator<Item = &WorkItem> + '_ {
        self.queue.iter()
    }

    #[inline]
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether an item was handed out during the current round.
    #[inline]
    pub fn disposed_this_round(&self) -> bool {
        self.disposed
    }

    /// Number of items this manager has handed out.
    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    fn has_room(&self) -> bool {
        self.max_queued == 0 || self.queue.len() < self.max_queued
    }

    fn collect(&mut self, ctx: &mut Context<'_>) {
        if !self.has_room() {
            return;
        }
        let Some(item) = ctx.take_from_pool() else {
            return;
        };

        let collected = Arc::from(item.name());
        self.queue.push_back(item);
        ctx.emit(NoticeKind::ItemCollected {
            manager: Arc::clone(&self.name),
            item: collected,
            queue: self.queue.iter().map(|i| Arc::from(i.name())).collect(),
        });
    }

    fn dispose(&mut self, ctx: &mut Context<'_>) {
        let Some(head) = self.queue.pop_front() else {
            return;
        };
        let item = Arc::from(head.name());

        match ctx.dispose(head) {
            Ok(claimant) => {
                self.disposed = true;
                self.dispatched += 1;
                let worker = ctx.name_of(claimant).unwrap_or_else(|| Arc::from("?"));
                ctx.emit(NoticeKind::ItemDisposed {
                    manager: Arc::clone(&self.name),
                    item,
                    worker,
                });
            }
            Err(unclaimed) => self.queue.push_front(unclaimed.into_inner()),
        }
    }
}

impl Updatable for Manager {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &mut Context<'_>) {
        self.collect(ctx);
        self.dispose(ctx);
    }

    fn after_update(&mut self, ctx: &mut Context<'_>) {
        if !self.disposed {
            return;
        }
        self.disposed = false;
        if ctx.requeue() {
            ctx.emit(NoticeKind::ManagerRequeued {
                manager: Arc::clone(&self.name),
            });
        }
    }
}
