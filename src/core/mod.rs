//! Runtime core: slots, rounds and pacing.
//!
//! Internal modules:
//! - [`scheduler`]: owns entities, pool and events; runs one round per `tick()`;
//! - [`context`]: per-callback access to shared state and the claim event;
//! - [`slots`]: entity storage addressed by [`EntityId`];
//! - [`builder`]: attaches sinks and subscribers;
//! - [`driver`]: async pacing with cancellation;
//! - [`shutdown`]: cross-platform termination signals.

mod builder;
mod config;
mod context;
mod driver;
mod scheduler;
mod slots;

pub mod shutdown;

pub use builder::SchedulerBuilder;
pub use config::SchedulerConfig;
pub use context::Context;
pub use driver::Driver;
pub use scheduler::Scheduler;
pub use slots::EntityId;
