//! # Termination signals for the async driver.
//!
//! [`wait_for_shutdown_signal`] completes once the process is asked to stop.
//! [`Driver::run_until_signal`](crate::Driver::run_until_signal) races it
//! against the round loop.
//!
//! | Platform | Signals                                   |
//! |----------|-------------------------------------------|
//! | Unix     | `SIGINT` (Ctrl-C), `SIGTERM`, `SIGQUIT`   |
//! | other    | Ctrl-C via [`tokio::signal::ctrl_c`]      |

use crate::error::RuntimeError;

/// Waits until a termination signal arrives.
///
/// Listeners are registered on the first poll, so signals delivered before
/// that are not observed.
///
/// # Errors
/// [`RuntimeError::Signal`] if a listener cannot be registered.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> Result<(), RuntimeError> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;

    let which = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
        _ = quit.recv() => "SIGQUIT",
    };
    tracing::info!(signal = which, "shutdown requested");
    Ok(())
}

/// Waits until Ctrl-C is pressed.
///
/// # Errors
/// [`RuntimeError::Signal`] if the listener cannot be registered.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> Result<(), RuntimeError> {
    tokio::signal::ctrl_c().await?;
    tracing::info!(signal = "ctrl_c", "shutdown requested");
    Ok(())
}
