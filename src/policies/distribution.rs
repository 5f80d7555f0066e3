//! # Distribution policies for [`Event`](crate::Event) delivery.
//!
//! [`Distribution`] decides which subscribers a single `invoke` reaches:
//!
//! - [`Distribution::Broadcast`] every subscriber, in subscription order; the registry is left untouched.
//! - [`Distribution::SingleClaim`] exactly one subscriber, removed from the registry as it is selected.
//!
//! ## Claim order
//! ```text
//! registry: [w1, w2, w3]            (w3 subscribed last)
//!
//! SingleClaim(Newest)  → w3         (LIFO, default)
//! SingleClaim(Oldest)  → w1         (FIFO, first come first served)
//! ```
//!
//! ## Rules
//! - Broadcast reports delivery even with zero subscribers: nothing to do is success.
//! - SingleClaim on an empty registry reports no delivery and has no side effect.
//! - Selection and removal of the claimant happen in the same `&mut` step,
//!   so two invocations can never pick the same subscriber.

use std::hash::Hash;

use crate::events::{Delivery, Registry};

/// Which subscriber a [`Distribution::SingleClaim`] event hands the delivery to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClaimOrder {
    /// Most recently subscribed first (LIFO).
    #[default]
    Newest,
    /// Earliest subscribed first (FIFO).
    Oldest,
}

/// Delivery policy bound to an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Distribution {
    /// Deliver to every subscriber.
    #[default]
    Broadcast,
    /// Deliver to at most one subscriber and unsubscribe it.
    SingleClaim(ClaimOrder),
}

impl Distribution {
    /// Single-claim policy with the default [`ClaimOrder::Newest`].
    #[inline]
    pub fn single_claim() -> Self {
        Distribution::SingleClaim(ClaimOrder::default())
    }

    /// Returns `true` for [`Distribution::Broadcast`].
    #[inline]
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Distribution::Broadcast)
    }

    /// Selects the recipients of one invocation from `registry`.
    ///
    /// - Broadcast: snapshot of all handles, registry unchanged, always delivered.
    /// - SingleClaim: removes one handle per [`ClaimOrder`]; not delivered if empty.
    pub fn select<H: Copy + Eq + Hash>(&self, registry: &mut Registry<H>) -> Delivery<H> {
        match self {
            Distribution::Broadcast => Delivery::new(registry.snapshot(), true),
            Distribution::SingleClaim(order) => {
                let claimant = match order {
                    ClaimOrder::Newest => registry.pop_last(),
                    ClaimOrder::Oldest => registry.pop_first(),
                };
                match claimant {
                    Some(h) => Delivery::new(vec![h], true),
                    None => Delivery::new(Vec::new(), false),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(handles: &[u32]) -> Registry<u32> {
        let mut reg = Registry::new();
        for h in handles {
            reg.insert(*h);
        }
        reg
    }

    #[test]
    fn test_broadcast_selects_all_and_keeps_registry() {
        let mut reg = registry(&[1, 2, 3]);
        let d = Distribution::Broadcast.select(&mut reg);
        assert!(d.is_delivered());
        assert_eq!(d.recipients(), [1, 2, 3]);
        assert_eq!(reg.snapshot(), [1, 2, 3]);
    }

    #[test]
    fn test_broadcast_empty_is_delivered() {
        let mut reg = registry(&[]);
        let d = Distribution::Broadcast.select(&mut reg);
        assert!(d.is_delivered(), "nothing to do is success");
        assert!(d.recipients().is_empty());
    }

    #[test]
    fn test_single_claim_newest_first() {
        let mut reg = registry(&[1, 2, 3]);
        let policy = Distribution::single_claim();
        assert_eq!(policy.select(&mut reg).into_claimant(), Some(3));
        assert_eq!(policy.select(&mut reg).into_claimant(), Some(2));
        assert_eq!(reg.snapshot(), [1]);
    }

    #[test]
    fn test_single_claim_oldest_first() {
        let mut reg = registry(&[1, 2, 3]);
        let policy = Distribution::SingleClaim(ClaimOrder::Oldest);
        assert_eq!(policy.select(&mut reg).into_claimant(), Some(1));
        assert_eq!(reg.snapshot(), [2, 3]);
    }

    #[test]
    fn test_single_claim_empty_not_delivered() {
        let mut reg = registry(&[]);
        let d = Distribution::single_claim().select(&mut reg);
        assert!(!d.is_delivered());
        assert_eq!(d.into_claimant(), None);
    }

    #[test]
    fn test_single_claim_delivers_each_handle_at_most_once() {
        let mut reg = registry(&[1, 2, 3, 4]);
        let policy = Distribution::single_claim();
        let mut seen = Vec::new();
        while let Some(h) = policy.select(&mut reg).into_claimant() {
            assert!(!seen.contains(&h), "handle {h} claimed twice");
            seen.push(h);
        }
        assert_eq!(seen.len(), 4);
        assert!(reg.is_empty());
    }
}
