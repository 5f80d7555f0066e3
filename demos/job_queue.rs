//! # Example: Job Queue
//!
//! Two managers hand five jobs to two workers, one round every 10ms.
//!
//! ```text
//! pool ──► Irene (M) [cap 1] ──┐                 ┌──► Steve (w)
//!      └─► Clark (M) [cap 2] ──┴──► claim event ─┴──► Sophi (w)
//! ```
//!
//! Run:
//! ```bash
//! RUST_LOG=jobvisor=debug cargo run --example job_queue --features logging
//! ```
//! Stops after 100 rounds or on Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use jobvisor::{Driver, LogWriter, Manager, Scheduler, SchedulerConfig, Subscribe, Worker, sample_items};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cfg = SchedulerConfig {
        tick_interval: Duration::from_millis(10),
        max_ticks: 100,
        ..SchedulerConfig::default()
    };

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let mut scheduler = Scheduler::builder(cfg.clone())
        .with_subscribers(subs)
        .build();

    scheduler.add(Worker::new("Steve (w)"));
    scheduler.add(Worker::new("Sophi (w)"));
    scheduler.add(Manager::with_defaults("Irene (M)", &cfg));
    scheduler.add(Manager::with_defaults("Clark (M)", &cfg).with_max_queued(2));
    scheduler.load(sample_items("Job", 5));

    let ticks = Driver::new(&cfg).run_until_signal(&mut scheduler).await?;
    tracing::info!(ticks, pending = scheduler.pool_len(), "demo finished");

    scheduler.shutdown().await;
    Ok(())
}
