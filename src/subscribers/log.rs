//! # Simple stdout subscriber for demos.
//!
//! [`LogWriter`] prints every notice as a status line.
//!
//! ## Output format
//! ```text
//! Time: 0.00s | Steve (w) queued for a job
//! Time: 0.00s | Irene (M) collected Job nr 4 | jobs to dispose: [Job nr 4]
//! Time: 0.00s | Steve (w) started working on Job nr 4 (estimated time: 0.13s)
//! Time: 0.00s | Irene (M) disposed Job nr 4 successfully to Steve (w)
//! Time: 0.00s | Irene (M) moved to the end of the queue
//! ```

use async_trait::async_trait;

use crate::events::Notice;
use crate::subscribers::Subscribe;

/// Stdout notice printer.
///
/// Enabled via the `logging` feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_notice(&self, notice: &Notice) {
        println!("{notice}");
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
