//! Error types used by the scheduler and its driver.
//!
//! Rounds themselves never fail: a claim nobody answers is a `false`, not an
//! error. Errors only appear at the API boundary:
//!
//! - [`SchedulerError`]: lookups and (un)subscription of entities that do not exist.
//! - [`RuntimeError`]: failures of the async driver itself.
//! - [`Unclaimed`]: a dispose attempt no worker answered; carries the item back.

use thiserror::Error;

use crate::core::EntityId;
use crate::work::WorkItem;

/// # Errors produced by scheduler API calls.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No entity was ever added under this id, or it has been removed.
    #[error("unknown entity {id}")]
    UnknownEntity {
        /// The id that was looked up.
        id: EntityId,
    },

    /// The entity is running its own callback and is temporarily out of its slot.
    #[error("entity {id} is busy running a callback")]
    EntityBusy {
        /// The id that was looked up.
        id: EntityId,
    },

    /// Typed lookup asked for the wrong concrete type.
    #[error("entity {id} is not a {expected}")]
    TypeMismatch {
        /// The id that was looked up.
        id: EntityId,
        /// Requested type name.
        expected: &'static str,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use jobvisor::{EntityId, SchedulerError};
    ///
    /// let err = SchedulerError::UnknownEntity { id: EntityId::from_raw(7) };
    /// assert_eq!(err.as_label(), "scheduler_unknown_entity");
    /// assert_eq!(err.to_string(), "unknown entity #7");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::UnknownEntity { .. } => "scheduler_unknown_entity",
            SchedulerError::EntityBusy { .. } => "scheduler_entity_busy",
            SchedulerError::TypeMismatch { .. } => "scheduler_type_mismatch",
        }
    }
}

/// # Errors produced by the async driver.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Registering OS signal handlers failed.
    #[error("failed to listen for shutdown signals: {0}")]
    Signal(#[from] std::io::Error),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Signal(_) => "runtime_signal",
        }
    }
}

/// A work item no waiting worker received.
///
/// Returned by [`Context::dispose`](crate::Context::dispose) so the caller keeps ownership.
#[derive(Error, Debug)]
#[error("no worker claimed {0}")]
pub struct Unclaimed(pub WorkItem);

impl Unclaimed {
    /// Returns the item that was not delivered.
    pub fn into_inner(self) -> WorkItem {
        self.0
    }
}
