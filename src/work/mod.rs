//! # Work items and their sources.
//!
//! - [`WorkItem`] the unit of work with a fixed duration and a done predicate
//! - [`sample_items`] seed items with random durations for demos and tests

mod item;
mod source;

pub use item::{RANDOM_DURATION_SECS, WorkItem};
pub use source::{sample_items, sample_items_with};
