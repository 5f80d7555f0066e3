//! # Async notice subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for observing notices off the
//! scheduling path.
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently of the rounds)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged)
//!
//! ## Architecture
//! ```text
//! Scheduler::tick() ──► SubscriberSet (Sink) ──► [bounded queue] ──► worker task ──► subscriber.on_notice()
//!                                                                              └─► panic caught → tracing::error!
//! ```
//!
//! ## Rules
//! - A slow subscriber only affects its own queue.
//! - Queue overflow drops the notice **for this subscriber only** (logged with `tracing::warn!`).
//! - Notices are processed sequentially (FIFO) per subscriber.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use jobvisor::{Notice, NoticeKind, Subscribe};
//!
//! struct Dispatches;
//!
//! #[async_trait]
//! impl Subscribe for Dispatches {
//!     async fn on_notice(&self, notice: &Notice) {
//!         if matches!(notice.kind, NoticeKind::ItemDisposed { .. }) {
//!             // count a dispatch, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "dispatches" }
//!     fn queue_capacity(&self) -> usize { 256 }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Notice;

/// Async notice subscriber.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single notice.
    ///
    /// Called from a dedicated worker task, not from inside the round.
    async fn on_notice(&self, notice: &Notice);

    /// Returns the subscriber name used in diagnostics.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber (clamped to at least 1).
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
