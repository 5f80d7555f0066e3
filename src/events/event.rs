//! # Dispatch event: ordered subscribers plus one distribution policy.
//!
//! An [`Event`] is a named registry of subscriber handles with a bound
//! [`Distribution`]. Invoking it selects recipients per the policy and
//! delivers to them.
//!
//! ## Architecture
//! ```text
//! attach(h) ──► Registry [h1, h2, h3] ◄── detach(h) / reattach(h)
//!                     │
//!                select()                (policy step, &mut self)
//!                     │
//!                     ▼
//!               Delivery { recipients, delivered }
//!                     │
//!          caller dispatches to recipients (outside the borrow)
//! ```
//!
//! Splitting selection from dispatch is what lets a recipient mutate the
//! registry it was selected from: the broadcast works on the snapshot taken at
//! selection time, so handles attached or moved by a callback only take effect
//! on the next invocation.
//!
//! ## Example
//! ```rust
//! use jobvisor::{Distribution, Event};
//!
//! let mut claim: Event<u32> = Event::with_distribution("claim", Distribution::single_claim());
//! claim.attach(1);
//! claim.attach(2);
//! claim.attach(2); // no-op
//!
//! let mut got = Vec::new();
//! assert!(claim.invoke("job", |h, job| got.push((h, job))));
//! assert_eq!(got, [(2, "job")]);
//! assert!(!claim.contains(2));
//! ```

use std::hash::Hash;

use crate::events::Registry;
use crate::policies::Distribution;

/// Recipients selected by one invocation.
#[must_use = "a delivery must be dispatched to its recipients"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery<H> {
    recipients: Vec<H>,
    delivered: bool,
}

impl<H> Delivery<H> {
    pub(crate) fn new(recipients: Vec<H>, delivered: bool) -> Self {
        Self {
            recipients,
            delivered,
        }
    }

    /// Whether the invocation counts as delivered (see [`Distribution`]).
    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    /// Selected recipients, in delivery order.
    #[inline]
    pub fn recipients(&self) -> &[H] {
        &self.recipients
    }

    /// The single claimant, for single-claim deliveries.
    pub fn into_claimant(self) -> Option<H> {
        self.recipients.into_iter().next()
    }
}

impl<H> IntoIterator for Delivery<H> {
    type Item = H;
    type IntoIter = std::vec::IntoIter<H>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipients.into_iter()
    }
}

/// Named registry of subscriber handles with a bound [`Distribution`].
#[derive(Clone, Debug)]
pub struct Event<H> {
    name: &'static str,
    registry: Registry<H>,
    distribution: Distribution,
}

impl<H: Copy + Eq + Hash> Event<H> {
    /// Creates a broadcast event.
    pub fn new(name: &'static str) -> Self {
        Self::with_distribution(name, Distribution::Broadcast)
    }

    /// Creates an event bound to `distribution`.
    pub fn with_distribution(name: &'static str, distribution: Distribution) -> Self {
        Self {
            name,
            registry: Registry::new(),
            distribution,
        }
    }

    /// Event name used in diagnostics.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Currently bound policy.
    #[inline]
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// Swaps the bound policy. Subscribers are kept.
    pub fn set_distribution(&mut self, distribution: Distribution) {
        self.distribution = distribution;
    }

    /// Subscribes `handle` if absent. Returns `true` if it was added.
    pub fn attach(&mut self, handle: H) -> bool {
        self.registry.insert(handle)
    }

    /// Unsubscribes `handle` if present. Returns `true` if it was removed.
    pub fn detach(&mut self, handle: H) -> bool {
        self.registry.remove(handle)
    }

    /// Moves `handle` to the most-recently-subscribed position (subscribing it if absent).
    pub fn reattach(&mut self, handle: H) {
        self.registry.move_to_back(handle);
    }

    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        self.registry.contains(handle)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Subscribers in subscription order.
    pub fn handles(&self) -> Vec<H> {
        self.registry.snapshot()
    }

    /// Runs the policy step: picks recipients and, for single-claim, unsubscribes the claimant.
    pub fn select(&mut self) -> Delivery<H> {
        self.distribution.select(&mut self.registry)
    }

    /// Selects recipients and calls `f` once per recipient with a clone of `args`.
    ///
    /// Returns whether the invocation was delivered. `f` cannot reach this event;
    /// use [`select`](Self::select) when recipients need to mutate it.
    pub fn invoke<A, F>(&mut self, args: A, mut f: F) -> bool
    where
        A: Clone,
        F: FnMut(H, A),
    {
        let delivery = self.select();
        let delivered = delivery.is_delivered();

        let mut recipients = delivery.into_iter().peekable();
        while let Some(handle) = recipients.next() {
            if recipients.peek().is_some() {
                f(handle, args.clone());
            } else {
                f(handle, args);
                break;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::ClaimOrder;

    #[test]
    fn test_attach_twice_single_entry() {
        let mut ev = Event::new("update");
        assert!(ev.attach(1));
        assert!(!ev.attach(1));
        assert_eq!(ev.handles(), [1]);
        assert!(!ev.detach(5), "detach of absent handle is a no-op");
        assert_eq!(ev.len(), 1);
    }

    #[test]
    fn test_broadcast_invokes_each_once_in_order() {
        let mut ev = Event::new("update");
        for h in [10, 20, 30] {
            ev.attach(h);
        }
        let mut calls = Vec::new();
        assert!(ev.invoke((), |h, ()| calls.push(h)));
        assert_eq!(calls, [10, 20, 30]);
        assert_eq!(ev.handles(), [10, 20, 30], "registry unchanged after broadcast");
    }

    #[test]
    fn test_broadcast_without_subscribers_returns_true() {
        let mut ev: Event<u8> = Event::new("update");
        let mut called = false;
        assert!(ev.invoke((), |_, ()| called = true));
        assert!(!called);
    }

    #[test]
    fn test_single_claim_removes_claimant() {
        let mut ev = Event::with_distribution("claim", Distribution::single_claim());
        ev.attach(1);
        ev.attach(2);

        let mut got = Vec::new();
        assert!(ev.invoke(String::from("a"), |h, job| got.push((h, job))));
        assert!(ev.invoke(String::from("b"), |h, job| got.push((h, job))));
        assert!(!ev.invoke(String::from("c"), |h, job| got.push((h, job))));

        assert_eq!(got, [(2, "a".to_string()), (1, "b".to_string())]);
        assert!(ev.is_empty());
    }

    #[test]
    fn test_reattach_moves_to_back() {
        let mut ev = Event::new("update");
        for h in [1, 2, 3] {
            ev.attach(h);
        }
        ev.reattach(1);
        assert_eq!(ev.handles(), [2, 3, 1]);
    }

    #[test]
    fn test_swap_distribution_keeps_subscribers() {
        let mut ev = Event::new("claim");
        ev.attach(1);
        ev.attach(2);
        ev.set_distribution(Distribution::SingleClaim(ClaimOrder::Oldest));
        assert_eq!(ev.select().into_claimant(), Some(1));
        assert_eq!(ev.handles(), [2]);
    }

    #[test]
    fn test_select_snapshot_ignores_later_mutation() {
        let mut ev = Event::new("update");
        ev.attach(1);
        ev.attach(2);
        let delivery = ev.select();
        ev.attach(3);
        ev.reattach(1);
        assert_eq!(delivery.recipients(), [1, 2]);
        assert_eq!(ev.handles(), [2, 3, 1]);
    }
}
