//! # Per-callback access to the scheduler's shared state.
//!
//! A [`Context`] is handed to [`Updatable::update`], [`Updatable::after_update`]
//! and [`Workable::work_on`](crate::Workable::work_on). It borrows the
//! scheduler's events, pool and sinks for the duration of one callback.
//!
//! ## Dispatch
//! ```text
//! Scheduler::tick()
//!   └─► update.select() ──► [m1, w1, m2]          (snapshot)
//!         └─► for id: slots.take(id) ──► entity.update(&mut Context) ──► slots.restore(id)
//!                                            │
//!                                            └─► ctx.dispose(item)
//!                                                  └─► claim.select() ──► w1 (removed from claim)
//!                                                        └─► slots.take(w1) ──► work_on(item, &mut Context) ──► restore
//! ```
//!
//! ## Rules
//! - The running entity is out of its slot; it is reachable only through `&mut self`.
//! - Registry changes made through a context (join, requeue) affect the next
//!   selection of that event, never a broadcast already in progress.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::scheduler::Core;
use crate::core::slots::{EntityId, Slots};
use crate::entities::Updatable;
use crate::error::Unclaimed;
use crate::events::NoticeKind;
use crate::work::WorkItem;

/// Scheduler state visible to an entity while one of its callbacks runs.
pub struct Context<'a> {
    id: EntityId,
    core: &'a mut Core,
    slots: &'a mut Slots,
}

impl<'a> Context<'a> {
    /// Id of the entity this context was created for.
    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Current instant.
    #[inline]
    pub fn now(&self) -> Instant {
        Instant::now()
    }

    /// Time since the scheduler was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.core.started.elapsed()
    }

    /// Name of another entity (or this one).
    pub fn name_of(&self, id: EntityId) -> Option<Arc<str>> {
        self.slots.name(id)
    }

    /// Emits a notice to the scheduler's sinks.
    pub fn emit(&mut self, kind: NoticeKind) {
        self.core.emit(kind);
    }

    /// Number of items left in the shared pool.
    #[inline]
    pub fn pool_len(&self) -> usize {
        self.core.pool.len()
    }

    /// Pops the most recently loaded item from the shared pool.
    pub fn take_from_pool(&mut self) -> Option<WorkItem> {
        self.core.pool.pop()
    }

    /// Subscribes this entity to the claim event. Returns `false` if already subscribed.
    pub fn join_claim(&mut self) -> bool {
        self.core.claim.attach(self.id)
    }

    /// Unsubscribes this entity from the claim event. Returns `false` if it was not subscribed.
    pub fn leave_claim(&mut self) -> bool {
        self.core.claim.detach(self.id)
    }

    /// Whether this entity is subscribed to the claim event.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.core.claim.contains(self.id)
    }

    /// Number of entities subscribed to the claim event.
    #[inline]
    pub fn waiting_len(&self) -> usize {
        self.core.claim.len()
    }

    /// Offers `item` on the claim event.
    ///
    /// On success the claimant has been unsubscribed and has already received
    /// the item through [`Workable::work_on`](crate::Workable::work_on).
    ///
    /// # Errors
    /// Returns [`Unclaimed`] with the item when nobody is waiting.
    pub fn dispose(&mut self, item: WorkItem) -> Result<EntityId, Unclaimed> {
        offer(self.core, self.slots, item)
    }

    /// Moves this entity to the end of the update and after-update order.
    ///
    /// Returns `false` (and changes nothing) if the entity is not subscribed to update.
    pub fn requeue(&mut self) -> bool {
        if !self.core.update.contains(self.id) {
            return false;
        }
        self.core.update.reattach(self.id);
        if self.core.after_update.contains(self.id) {
            self.core.after_update.reattach(self.id);
        }
        true
    }
}

/// Runs `f` on entity `id` with a context for it; `None` if the slot is not ready.
pub(crate) fn dispatch<R>(
    core: &mut Core,
    slots: &mut Slots,
    id: EntityId,
    f: impl FnOnce(&mut dyn Updatable, &mut Context<'_>) -> R,
) -> Option<R> {
    let mut entity = slots.take(id)?;
    let out = {
        let mut ctx = Context {
            id,
            core: &mut *core,
            slots: &mut *slots,
        };
        f(entity.as_mut(), &mut ctx)
    };
    slots.restore(id, entity);
    Some(out)
}

/// Single-claim delivery of `item` to one waiting worker.
pub(crate) fn offer(core: &mut Core, slots: &mut Slots, item: WorkItem) -> Result<EntityId, Unclaimed> {
    let Some(claimant) = core.claim.select().into_claimant() else {
        return Err(Unclaimed(item));
    };
    let Some(mut entity) = slots.take(claimant) else {
        tracing::warn!(entity = %claimant, item = item.name(), "claimant is gone; item not delivered");
        return Err(Unclaimed(item));
    };

    let out = match entity.as_workable() {
        Some(workable) => {
            let mut ctx = Context {
                id: claimant,
                core: &mut *core,
                slots: &mut *slots,
            };
            workable.work_on(item, &mut ctx);
            Ok(claimant)
        }
        None => {
            tracing::warn!(entity = %claimant, item = item.name(), "claimant cannot work; item not delivered");
            Err(Unclaimed(item))
        }
    };
    slots.restore(claimant, entity);
    out
}
