//! # Notice sinks and subscribers.
//!
//! Every notice emitted during a round is handed synchronously to each
//! configured [`Sink`]. The [`SubscriberSet`] sink forwards it to async
//! [`Subscribe`] implementations through per-subscriber queues.
//!
//! ## Architecture
//! ```text
//! Entity ── ctx.emit(NoticeKind) ──► Scheduler ──► Sink::emit(&Notice)
//!                                                   │
//!                                                   ├──► TracingSink   (tracing::info!)
//!                                                   ├──► Recorder      (in-memory, tests)
//!                                                   └──► SubscriberSet ──► [queue] ──► Subscribe::on_notice()
//!                                                                                          │
//!                                                                               ┌──────────┼──────────┐
//!                                                                               ▼          ▼          ▼
//!                                                                           LogWriter   Metrics    Custom
//! ```
//!
//! ## Choosing a sink
//! - **Sink** when the handler is cheap and must observe notices inside the round
//! - **Subscribe** when the handler does I/O or may be slow

mod sink;
mod subscriber;
mod subscriber_set;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use sink::{Recorder, Sink, TracingSink};
pub use subscriber::Subscribe;
pub use subscriber_set::SubscriberSet;
