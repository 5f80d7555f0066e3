//! # jobvisor
//!
//! **Jobvisor** is a small round-based job dispatcher built on an
//! in-process event bus.
//!
//! Managers collect work items from a shared pool and offer them to workers
//! waiting on a single-claim event. One round (`tick`) broadcasts an update
//! to every entity and then an after-update. Managers that handed out work
//! move to the end of the order, which rotates service between them.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Manager    │   │   Manager    │   │    Worker    │   ...
//!     │ (Updatable)  │   │ (Updatable)  │   │ (+Workable)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Scheduler                                                        │
//! │  - Slots (entities by EntityId)                                   │
//! │  - pool: Vec<WorkItem> (pops from the tail)                       │
//! │  - update        Event<EntityId>  Broadcast                       │
//! │  - after_update  Event<EntityId>  Broadcast                       │
//! │  - claim         Event<EntityId>  SingleClaim(Newest | Oldest)    │
//! │  - sinks         TracingSink / Recorder / SubscriberSet           │
//! └──────┬─────────────────────────────────────────────────────┬──────┘
//!        │ tick()                                              │ Notice
//!        ▼                                                     ▼
//!   update.select() ──► e.update(&mut Context)          Sink::emit(&Notice)
//!   after_update.select() ──► e.after_update(..)               │
//!                                                              ▼
//!                                              SubscriberSet ──► [queue] ──► Subscribe
//! ```
//!
//! ### Round
//! ```text
//! Manager.update:  collect (if room) ──► dispose head ──► claim.select()
//!                                                           ├─ Some(w) ─► w.work_on(item)
//!                                                           └─ None    ─► item stays at head
//! Worker.update:   finish current if done ──► join claim if idle
//! Manager.after_update: disposed this round? ──► requeue (move to the back)
//! ```
//!
//! ## Features
//! | Area              | Description                                                | Key types / traits                       |
//! |-------------------|------------------------------------------------------------|------------------------------------------|
//! | **Events**        | Ordered registries bound to a distribution policy.         | [`Event`], [`Distribution`], [`Registry`]|
//! | **Entities**      | Round-driven participants and the work capability.         | [`Updatable`], [`Workable`]              |
//! | **Roles**         | Producer and consumer of work items.                       | [`Manager`], [`Worker`]                  |
//! | **Scheduling**    | Explicit coordinator, async driver, signals.               | [`Scheduler`], [`Driver`]                |
//! | **Observability** | Status notices to sinks and async subscribers.             | [`Sink`], [`Subscribe`], [`Notice`]      |
//! | **Errors**        | Typed errors at the API boundary.                          | [`SchedulerError`], [`RuntimeError`]     |
//! | **Configuration** | Centralized settings.                                      | [`SchedulerConfig`]                      |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use jobvisor::{Manager, Recorder, Scheduler, SchedulerConfig, Worker, sample_items};
//!
//! let recorder = Recorder::new();
//! let mut scheduler = Scheduler::builder(SchedulerConfig::default())
//!     .with_sink(recorder.clone())
//!     .build();
//!
//! scheduler.add(Worker::new("Steve (w)"));
//! scheduler.add(Manager::new("Irene (M)"));
//! scheduler.load(sample_items("Job", 3));
//!
//! scheduler.tick();
//! assert_eq!(scheduler.pool_len(), 2);
//! assert!(recorder
//!     .messages()
//!     .contains(&"Irene (M) disposed Job nr 2 successfully to Steve (w)".to_string()));
//! ```
mod core;
mod entities;
mod error;
mod events;
mod policies;
mod subscribers;
mod work;

// ---- Public re-exports ----

pub use core::shutdown;
pub use core::{Context, Driver, EntityId, Scheduler, SchedulerBuilder, SchedulerConfig};
pub use entities::{Manager, Updatable, Workable, Worker, WorkerState};
pub use error::{RuntimeError, SchedulerError, Unclaimed};
pub use events::{Delivery, Event, Notice, NoticeKind, Registry};
pub use policies::{ClaimOrder, Distribution};
pub use subscribers::{Recorder, Sink, Subscribe, SubscriberSet, TracingSink};
pub use work::{RANDOM_DURATION_SECS, WorkItem, sample_items, sample_items_with};

// Optional: expose a simple built-in stdout subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
