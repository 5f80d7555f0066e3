//! # Entity slots addressed by opaque ids.
//!
//! The scheduler owns every entity in a slot. Events only ever store the
//! [`EntityId`] of a slot, never a reference to the entity itself.
//!
//! ## Slot lifecycle
//! ```text
//! insert ──► Ready ──take()──► InFlight ──restore()──► Ready
//!              │                   │
//!           remove()            remove() → EntityBusy (slot untouched)
//!              ▼
//!            Vacant (id is never reused)
//! ```
//!
//! ## Rules
//! - An entity is `InFlight` only while one of its own callbacks runs.
//! - Ids are dense indices and are never recycled, so a stale handle can
//!   only ever resolve to `Vacant`.

use std::fmt;
use std::sync::Arc;

use crate::entities::Updatable;
use crate::error::SchedulerError;

/// Opaque handle of an entity inside a [`Scheduler`](crate::Scheduler).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    /// Builds an id from its raw index.
    ///
    /// Useful in tests and diagnostics; a fabricated id simply resolves to
    /// [`SchedulerError::UnknownEntity`] if no such entity exists.
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Raw slot index.
    #[inline]
    pub const fn as_raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

enum SlotState {
    Ready(Box<dyn Updatable>),
    InFlight,
    Vacant,
}

struct Slot {
    name: Arc<str>,
    state: SlotState,
}

/// Dense storage of entities.
#[derive(Default)]
pub(crate) struct Slots {
    slots: Vec<Slot>,
}

impl Slots {
    pub(crate) fn insert(&mut self, entity: Box<dyn Updatable>) -> EntityId {
        let id = EntityId(self.slots.len());
        self.slots.push(Slot {
            name: Arc::from(entity.name()),
            state: SlotState::Ready(entity),
        });
        id
    }

    /// Number of live (ready or in-flight) entities.
    pub(crate) fn live(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| !matches!(s.state, SlotState::Vacant))
            .count()
    }

    pub(crate) fn contains(&self, id: EntityId) -> bool {
        self.slots
            .get(id.0)
            .is_some_and(|s| !matches!(s.state, SlotState::Vacant))
    }

    /// Name captured when the entity was added.
    pub(crate) fn name(&self, id: EntityId) -> Option<Arc<str>> {
        self.slots
            .get(id.0)
            .filter(|s| !matches!(s.state, SlotState::Vacant))
            .map(|s| Arc::clone(&s.name))
    }

    /// Moves a ready entity out of its slot for the duration of a callback.
    pub(crate) fn take(&mut self, id: EntityId) -> Option<Box<dyn Updatable>> {
        let slot = self.slots.get_mut(id.0)?;
        match std::mem::replace(&mut slot.state, SlotState::InFlight) {
            SlotState::Ready(entity) => Some(entity),
            other => {
                slot.state = other;
                None
            }
        }
    }

    /// Puts an entity back after its callback.
    pub(crate) fn restore(&mut self, id: EntityId, entity: Box<dyn Updatable>) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            if matches!(slot.state, SlotState::InFlight) {
                slot.state = SlotState::Ready(entity);
            }
        }
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Result<Box<dyn Updatable>, SchedulerError> {
        let slot = self
            .slots
            .get_mut(id.0)
            .ok_or(SchedulerError::UnknownEntity { id })?;
        match std::mem::replace(&mut slot.state, SlotState::Vacant) {
            SlotState::Ready(entity) => Ok(entity),
            SlotState::InFlight => {
                slot.state = SlotState::InFlight;
                Err(SchedulerError::EntityBusy { id })
            }
            SlotState::Vacant => Err(SchedulerError::UnknownEntity { id }),
        }
    }

    pub(crate) fn get(&self, id: EntityId) -> Result<&(dyn Updatable + 'static), SchedulerError> {
        match self.slots.get(id.0).map(|s| &s.state) {
            Some(SlotState::Ready(entity)) => Ok(entity.as_ref()),
            Some(SlotState::InFlight) => Err(SchedulerError::EntityBusy { id }),
            Some(SlotState::Vacant) | None => Err(SchedulerError::UnknownEntity { id }),
        }
    }

    pub(crate) fn get_mut(
        &mut self,
        id: EntityId,
    ) -> Result<&mut (dyn Updatable + 'static), SchedulerError> {
        match self.slots.get_mut(id.0).map(|s| &mut s.state) {
            Some(SlotState::Ready(entity)) => Ok(entity.as_mut()),
            Some(SlotState::InFlight) => Err(SchedulerError::EntityBusy { id }),
            Some(SlotState::Vacant) | None => Err(SchedulerError::UnknownEntity { id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;

    struct Probe;

    impl Updatable for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        fn update(&mut self, _ctx: &mut Context<'_>) {}
    }

    #[test]
    fn test_take_restore_cycle() {
        let mut slots = Slots::default();
        let id = slots.insert(Box::new(Probe));

        let entity = slots.take(id).expect("ready entity");
        assert!(slots.take(id).is_none(), "in-flight entity cannot be taken twice");
        assert_eq!(slots.get(id).err(), Some(SchedulerError::EntityBusy { id }));
        assert!(slots.remove(id).is_err());

        slots.restore(id, entity);
        assert!(slots.get(id).is_ok());
    }

    #[test]
    fn test_removed_id_is_unknown() {
        let mut slots = Slots::default();
        let a = slots.insert(Box::new(Probe));
        let b = slots.insert(Box::new(Probe));
        assert!(slots.remove(a).is_ok());

        assert!(!slots.contains(a));
        assert_eq!(slots.name(a), None);
        assert_eq!(slots.name(b).as_deref(), Some("probe"));
        assert_eq!(slots.live(), 1);
        assert!(matches!(
            slots.remove(a),
            Err(SchedulerError::UnknownEntity { .. })
        ));
        assert!(slots.take(EntityId::from_raw(42)).is_none());
    }
}
