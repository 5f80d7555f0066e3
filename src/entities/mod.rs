//! Entities driven by the scheduler.
//!
//! - [`Manager`] collects items from the shared pool and offers them on the claim event.
//! - [`Worker`] waits on the claim event and works on one item at a time.
//!
//! Custom entities implement [`Updatable`] (and [`Workable`] to receive items).

mod manager;
mod updatable;
mod worker;

pub use manager::Manager;
pub use updatable::{Updatable, Workable};
pub use worker::{Worker, WorkerState};
