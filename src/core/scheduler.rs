//! # Scheduler: owns the entities, the shared pool and the three events.
//!
//! The [`Scheduler`] is the coordinator of one simulation. It is created
//! explicitly, owns every entity, and runs rounds on demand.
//!
//! ## Events
//! ```text
//! update        Broadcast                 every subscribed entity acts
//! after_update  Broadcast                 every subscribed entity reacts to its own update
//! claim         SingleClaim(claim_order)  one waiting worker receives one item
//! ```
//!
//! ## Round
//! ```text
//! tick()
//!   ├─► update.select()        → snapshot [e1, e2, ...] → e.update(ctx) in order
//!   └─► after_update.select()  → snapshot [e1, e2, ...] → e.after_update(ctx) in order
//! ```
//!
//! Each callback runs to completion before the next one starts; nothing is
//! preempted and nothing suspends mid-call.
//!
//! ## Example
//! ```rust
//! use jobvisor::{Manager, Recorder, Scheduler, SchedulerConfig, WorkItem, Worker};
//!
//! let recorder = Recorder::new();
//! let mut scheduler = Scheduler::builder(SchedulerConfig::default())
//!     .with_sink(recorder.clone())
//!     .build();
//!
//! let worker = scheduler.add(Worker::new("W"));
//! let manager = scheduler.add(Manager::new("M"));
//! scheduler.load([WorkItem::new("A", 0.0), WorkItem::new("B", 0.0)]);
//!
//! scheduler.tick();
//! assert_eq!(
//!     scheduler.entity::<Worker>(worker).ok().and_then(|w| w.current()).map(|i| i.name()),
//!     Some("B"),
//! );
//! assert_eq!(scheduler.update_order(), [worker, manager]);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::builder::SchedulerBuilder;
use crate::core::context::{dispatch, offer};
use crate::core::slots::{EntityId, Slots};
use crate::core::SchedulerConfig;
use crate::entities::Updatable;
use crate::error::{SchedulerError, Unclaimed};
use crate::events::{Event, Notice, NoticeKind};
use crate::subscribers::{Sink, SubscriberSet};
use crate::work::WorkItem;

/// Shared state reachable from a [`Context`](crate::Context).
pub(crate) struct Core {
    pub(crate) pool: Vec<WorkItem>,
    pub(crate) update: Event<EntityId>,
    pub(crate) after_update: Event<EntityId>,
    pub(crate) claim: Event<EntityId>,
    pub(crate) started: Instant,
    sinks: Vec<Box<dyn Sink>>,
    fanout: Option<SubscriberSet>,
    next_seq: u64,
}

impl Core {
    pub(crate) fn emit(&mut self, kind: NoticeKind) {
        let notice = Notice::new(self.next_seq, self.started.elapsed(), kind);
        self.next_seq += 1;

        for sink in &self.sinks {
            sink.emit(&notice);
        }
        if let Some(fanout) = &self.fanout {
            fanout.emit(&notice);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Update,
    AfterUpdate,
}

impl Phase {
    fn event_name(self) -> &'static str {
        match self {
            Phase::Update => "update",
            Phase::AfterUpdate => "after_update",
        }
    }
}

/// Round-based coordinator of managers and workers.
pub struct Scheduler {
    cfg: SchedulerConfig,
    core: Core,
    slots: Slots,
    ticks: u64,
}

impl Scheduler {
    /// Creates a scheduler logging notices through [`TracingSink`](crate::TracingSink).
    pub fn new(cfg: SchedulerConfig) -> Self {
        SchedulerBuilder::new(cfg).build()
    }

    /// Returns a builder to configure sinks and subscribers.
    pub fn builder(cfg: SchedulerConfig) -> SchedulerBuilder {
        SchedulerBuilder::new(cfg)
    }

    pub(crate) fn from_parts(
        cfg: SchedulerConfig,
        sinks: Vec<Box<dyn Sink>>,
        fanout: Option<SubscriberSet>,
    ) -> Self {
        let claim = Event::with_distribution("claim", cfg.claim_distribution());
        Self {
            core: Core {
                pool: Vec::new(),
                update: Event::new("update"),
                after_update: Event::new("after_update"),
                claim,
                started: Instant::now(),
                sinks,
                fanout,
                next_seq: 0,
            },
            slots: Slots::default(),
            ticks: 0,
            cfg,
        }
    }

    /// Configuration this scheduler was built with.
    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.cfg
    }

    /// Adds an entity and subscribes it to update and after-update.
    pub fn add<E: Updatable>(&mut self, entity: E) -> EntityId {
        self.add_boxed(Box::new(entity))
    }

    /// Same as [`add`](Self::add) for an already boxed entity.
    pub fn add_boxed(&mut self, entity: Box<dyn Updatable>) -> EntityId {
        let id = self.slots.insert(entity);
        self.core.update.attach(id);
        self.core.after_update.attach(id);
        id
    }

    /// Subscribes an entity to update and after-update (no-op if already subscribed).
    ///
    /// # Errors
    /// [`SchedulerError::UnknownEntity`] if `id` does not name a live entity.
    pub fn subscribe(&mut self, id: EntityId) -> Result<(), SchedulerError> {
        self.ensure(id)?;
        self.core.update.attach(id);
        self.core.after_update.attach(id);
        Ok(())
    }

    /// Unsubscribes an entity from update and after-update (no-op if not subscribed).
    ///
    /// The entity keeps its claim subscription, if any.
    ///
    /// # Errors
    /// [`SchedulerError::UnknownEntity`] if `id` does not name a live entity.
    pub fn unsubscribe(&mut self, id: EntityId) -> Result<(), SchedulerError> {
        self.ensure(id)?;
        self.core.update.detach(id);
        self.core.after_update.detach(id);
        Ok(())
    }

    /// Removes an entity from the scheduler and from all three events.
    ///
    /// # Errors
    /// [`SchedulerError::UnknownEntity`] if `id` does not name a live entity.
    pub fn remove(&mut self, id: EntityId) -> Result<Box<dyn Updatable>, SchedulerError> {
        let entity = self.slots.remove(id)?;
        self.core.update.detach(id);
        self.core.after_update.detach(id);
        self.core.claim.detach(id);
        Ok(entity)
    }

    /// Appends items to the shared pool in the given order.
    ///
    /// The pool pops from the tail: the last item loaded is collected first.
    pub fn load<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = WorkItem>,
    {
        let before = self.core.pool.len();
        self.core.pool.extend(items);
        let count = self.core.pool.len() - before;
        if count > 0 {
            self.core.emit(NoticeKind::PoolLoaded {
                count,
                pending: self.core.pool.len(),
            });
        }
    }

    /// Offers an item directly on the claim event, bypassing managers.
    ///
    /// # Errors
    /// Returns [`Unclaimed`] with the item when nobody is waiting.
    pub fn offer(&mut self, item: WorkItem) -> Result<EntityId, Unclaimed> {
        offer(&mut self.core, &mut self.slots, item)
    }

    /// Runs one round: the update broadcast followed by the after-update broadcast.
    pub fn tick(&mut self) {
        self.ticks += 1;

        let recipients = self.core.update.select();
        for id in recipients {
            self.run_phase(id, Phase::Update);
        }

        let recipients = self.core.after_update.select();
        for id in recipients {
            self.run_phase(id, Phase::AfterUpdate);
        }
    }

    fn run_phase(&mut self, id: EntityId, phase: Phase) {
        let ran = dispatch(&mut self.core, &mut self.slots, id, |entity, ctx| match phase {
            Phase::Update => entity.update(ctx),
            Phase::AfterUpdate => entity.after_update(ctx),
        });
        if ran.is_none() {
            tracing::debug!(entity = %id, event = phase.event_name(), "skipping stale handle");
        }
    }

    /// Number of rounds run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time since the scheduler was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.core.started.elapsed()
    }

    /// Number of items waiting in the shared pool.
    #[inline]
    pub fn pool_len(&self) -> usize {
        self.core.pool.len()
    }

    /// Items waiting in the shared pool, oldest first (the last one is collected next).
    pub fn pool(&self) -> &[WorkItem] {
        &self.core.pool
    }

    /// Update subscribers in the order the next round will run them.
    pub fn update_order(&self) -> Vec<EntityId> {
        self.core.update.handles()
    }

    /// After-update subscribers in order.
    pub fn after_update_order(&self) -> Vec<EntityId> {
        self.core.after_update.handles()
    }

    /// Entities subscribed to the claim event, in subscription order.
    pub fn waiting(&self) -> Vec<EntityId> {
        self.core.claim.handles()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.slots.live()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name an entity was added with.
    pub fn name_of(&self, id: EntityId) -> Option<Arc<str>> {
        self.slots.name(id)
    }

    /// Typed access to an entity.
    ///
    /// # Errors
    /// [`SchedulerError::UnknownEntity`] for a dead id, [`SchedulerError::TypeMismatch`]
    /// if the entity is not a `T`.
    pub fn entity<T: Updatable>(&self, id: EntityId) -> Result<&T, SchedulerError> {
        let entity: &dyn Any = self.slots.get(id)?;
        entity
            .downcast_ref::<T>()
            .ok_or(SchedulerError::TypeMismatch {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Typed mutable access to an entity, e.g. to change a manager's capacity.
    ///
    /// # Errors
    /// Same as [`entity`](Self::entity).
    pub fn entity_mut<T: Updatable>(&mut self, id: EntityId) -> Result<&mut T, SchedulerError> {
        let entity: &mut dyn Any = self.slots.get_mut(id)?;
        entity
            .downcast_mut::<T>()
            .ok_or(SchedulerError::TypeMismatch {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Stops async subscribers after they drained their queues.
    pub async fn shutdown(self) {
        if let Some(fanout) = self.core.fanout {
            fanout.shutdown().await;
        }
    }

    fn ensure(&self, id: EntityId) -> Result<(), SchedulerError> {
        if self.slots.contains(id) {
            Ok(())
        } else {
            Err(SchedulerError::UnknownEntity { id })
        }
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("ticks", &self.ticks)
            .field("entities", &self.slots.live())
            .field("pool", &self.core.pool.len())
            .field("update", &self.core.update.handles())
            .field("waiting", &self.core.claim.handles())
            .finish()
    }
}
