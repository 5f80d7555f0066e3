//! # Entity capabilities.
//!
//! - [`Updatable`]: anything the scheduler drives once per round.
//! - [`Workable`]: an updatable that can receive work from the claim event.
//!
//! Both callbacks receive a [`Context`] borrowed from the scheduler for the
//! duration of the call; it is the only way an entity reaches shared state.
//!
//! ## Example
//! ```rust
//! use jobvisor::{Context, Scheduler, SchedulerConfig, Updatable};
//!
//! struct Counter {
//!     rounds: u32,
//! }
//!
//! impl Updatable for Counter {
//!     fn name(&self) -> &str { "counter" }
//!
//!     fn update(&mut self, _ctx: &mut Context<'_>) {
//!         self.rounds += 1;
//!     }
//! }
//!
//! let mut scheduler = Scheduler::new(SchedulerConfig::default());
//! let id = scheduler.add(Counter { rounds: 0 });
//! scheduler.tick();
//! scheduler.tick();
//! assert_eq!(scheduler.entity::<Counter>(id).map(|c| c.rounds), Ok(2));
//! ```

use std::any::Any;

use crate::core::Context;
use crate::work::WorkItem;

/// An entity driven by the update and after-update broadcasts.
pub trait Updatable: Any {
    /// Returns a stable, human-readable name.
    fn name(&self) -> &str;

    /// Called once per round, in update-subscriber order.
    fn update(&mut self, ctx: &mut Context<'_>);

    /// Called once per round after every update has run. Default: no-op.
    fn after_update(&mut self, ctx: &mut Context<'_>) {
        let _ = ctx;
    }

    /// Returns the work-receiving capability, if this entity has one.
    ///
    /// The claim event only ever delivers to entities that return `Some`.
    fn as_workable(&mut self) -> Option<&mut dyn Workable> {
        None
    }
}

/// Capability of receiving a work item from the claim event.
pub trait Workable {
    /// Takes ownership of `item` and starts working on it.
    fn work_on(&mut self, item: WorkItem, ctx: &mut Context<'_>);
}
