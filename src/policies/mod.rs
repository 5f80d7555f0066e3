//! Delivery policies.
//!
//! This module groups the knobs that control **how many** subscribers one
//! event invocation reaches and **which one** wins a single-claim delivery.
//!
//! ## Contents
//! - [`Distribution`] broadcast to all, or single-claim to at most one
//! - [`ClaimOrder`]   newest (LIFO) or oldest (FIFO) claimant first
//!
//! ## Quick wiring
//! ```text
//! Scheduler { update: Broadcast, after_update: Broadcast, claim: SingleClaim(cfg.claim_order) }
//! ```
//!
//! ## Defaults
//! - `Distribution::Broadcast`.
//! - `ClaimOrder::Newest`: the most recently queued worker gets the next item.

mod distribution;

pub use distribution::{ClaimOrder, Distribution};
