//! Dispatch events and status notices.
//!
//! This module groups the **dispatch** side of the bus (subscriber registry,
//! events and their deliveries) and the **status** side (notices emitted while
//! rounds run).
//!
//! ## Contents
//! - [`Registry`] ordered, duplicate-free subscriber handles
//! - [`Event`], [`Delivery`] named registry bound to a [`Distribution`](crate::Distribution)
//! - [`Notice`], [`NoticeKind`] structured status notifications
//!
//! See `core/mod.rs` for how the scheduler wires its three events.

mod event;
mod notice;
mod registry;

pub use event::{Delivery, Event};
pub use notice::{Notice, NoticeKind};
pub use registry::Registry;
