//! # Non-blocking notice fan-out to async subscribers.
//!
//! Provides [`SubscriberSet`], a [`Sink`] that hands every notice to multiple
//! [`Subscribe`] implementations without blocking the round that emitted it.
//!
//! ## Architecture
//! ```text
//! emit(notice)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_notice()
//!     │    (bounded)         └──────► panic → tracing::error!
//!     ├──► [queue 2] ──► worker 2 ──► subscriber2.on_notice()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► subscriberN.on_notice()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **No cross-subscriber ordering**: subscriber A may process notice N while B processes N+5
//! - **Overflow**: notice dropped for that subscriber only, logged with `tracing::warn!`
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Isolation**: slow/panicking subscriber doesn't affect others
//! - **Per-subscriber FIFO**: each subscriber sees notices in order
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::Notice;
use crate::subscribers::{Sink, Subscribe};

/// Per-subscriber channel metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Notice>>,
}

/// Fan-out coordinator for multiple notice subscribers.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// ### Notes
    /// - Must be called from within a tokio runtime.
    /// - Minimum queue capacity is 1 (enforced).
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Notice>>(cap);
            let s = Arc::clone(&sub);

            let handle = tokio::spawn(async move {
                while let Some(notice) = rx.recv().await {
                    let fut = s.on_notice(notice.as_ref());

                    if let Err(payload) = AssertUnwindSafe(fut).catch_unwind().await {
                        let reason = panic_reason(payload.as_ref());
                        tracing::error!(subscriber = s.name(), seq = notice.seq, reason, "subscriber panicked");
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }
        Self { channels, workers }
    }

    /// Number of subscribers in the set.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Sends a pre-allocated `Arc<Notice>` to all subscribers.
    ///
    /// - Uses `try_send` (non-blocking)
    /// - On queue full or closed: drops the notice for that subscriber and logs it
    pub fn emit_arc(&self, notice: Arc<Notice>) {
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&notice)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(subscriber = channel.name, seq = notice.seq, reason = "full", "notice dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::warn!(subscriber = channel.name, seq = notice.seq, reason = "closed", "notice dropped");
                }
            }
        }
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// 1. Drops all channel senders (workers drain their queues, then see channel closed)
    /// 2. Awaits all worker tasks to finish
    pub async fn shutdown(self) {
        drop(self.channels);

        for h in self.workers {
            let _ = h.await;
        }
    }
}

/// Text of a `panic!` payload, if it carried one.
fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

impl Sink for SubscriberSet {
    fn emit(&self, notice: &Notice) {
        self.emit_arc(Arc::new(notice.clone()));
    }

    fn name(&self) -> &'static str {
        "subscriber_set"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoticeKind;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Collect {
        seen: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl Subscribe for Collect {
        async fn on_notice(&self, notice: &Notice) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(notice.seq);
            }
        }

        fn name(&self) -> &'static str {
            "collect"
        }
    }

    struct Explode;

    #[async_trait]
    impl Subscribe for Explode {
        async fn on_notice(&self, _notice: &Notice) {
            panic!("boom");
        }
    }

    fn notice(seq: u64) -> Notice {
        Notice::new(
            seq,
            Duration::ZERO,
            NoticeKind::ManagerRequeued {
                manager: "m".into(),
            },
        )
    }

    #[tokio::test]
    async fn test_fan_out_delivers_in_order() {
        let a = Arc::new(Collect::default());
        let b = Arc::new(Collect::default());
        let subs: Vec<Arc<dyn Subscribe>> = vec![a.clone(), b.clone()];
        let set = SubscriberSet::new(subs);
        assert_eq!(set.len(), 2);

        for seq in 0..5 {
            set.emit(&notice(seq));
        }
        set.shutdown().await;

        for sub in [a, b] {
            let seen = sub.seen.lock().map(|s| s.clone()).unwrap_or_default();
            assert_eq!(seen, [0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_panic_reason_reads_payload() {
        let literal: Box<dyn Any + Send> = Box::new("boom");
        let formatted: Box<dyn Any + Send> = Box::new(format!("seq {}", 3));
        let other: Box<dyn Any + Send> = Box::new(42_u8);

        assert_eq!(panic_reason(literal.as_ref()), "boom");
        assert_eq!(panic_reason(formatted.as_ref()), "seq 3");
        assert_eq!(panic_reason(other.as_ref()), "non-string panic payload");
    }

    #[tokio::test]
    async fn test_panicking_subscriber_is_isolated() {
        let ok = Arc::new(Collect::default());
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Explode), ok.clone()];
        let set = SubscriberSet::new(subs);

        set.emit(&notice(0));
        set.emit(&notice(1));
        set.shutdown().await;

        let seen = ok.seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(seen, [0, 1]);
    }
}
