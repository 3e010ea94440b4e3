//! Per-slot scratch state populated by trigger arbitration.

use std::sync::Arc;

use crate::host::TriggerSource;

/// Opaque identity of a unit (the caster or a targeting candidate).
///
/// The core stores and compares ids but never interprets them; mapping an
/// id to an actual game object is the host's concern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Mutable scratch record for one trigger slot.
///
/// One context exists per registered table and is reused across
/// invocations: arbitration populates it when the slot activates and
/// [`clear`](EventContext::clear) resets it when the execution finishes.
/// Stage handlers may read and write it freely in between.
#[derive(Clone, Default)]
pub struct EventContext {
    trigger: Option<Arc<dyn TriggerSource>>,
    caster: Option<EntityId>,
    /// While this slot is active and the flag is set, triggers on other
    /// slots are rejected.
    pub restrict_transition: bool,
}

impl EventContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The input handle that activated this slot, if any.
    pub fn trigger(&self) -> Option<&Arc<dyn TriggerSource>> {
        self.trigger.as_ref()
    }

    pub fn caster(&self) -> Option<EntityId> {
        self.caster
    }

    /// Stores the activating input handle and caster identity.
    pub(crate) fn arm(&mut self, trigger: Arc<dyn TriggerSource>, caster: EntityId) {
        self.trigger = Some(trigger);
        self.caster = Some(caster);
    }

    /// Resets every field to its idle value.
    pub fn clear(&mut self) {
        self.trigger = None;
        self.caster = None;
        self.restrict_transition = false;
    }
}

impl std::fmt::Debug for EventContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventContext")
            .field("trigger", &self.trigger.as_ref().map(|_| "<source>"))
            .field("caster", &self.caster)
            .field("restrict_transition", &self.restrict_transition)
            .finish()
    }
}
