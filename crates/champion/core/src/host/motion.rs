//! Locomotion/animation-state capability.

/// Visual movement states the core can request after a cast ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MotionState {
    Idle,
    Moving,
}

/// Bridge to the host's locomotion and animation systems.
///
/// Default cleanup consults [`has_translation_input`] to decide whether
/// the character should return to `Idle` or `Moving`.
///
/// [`has_translation_input`]: MotionAdapter::has_translation_input
pub trait MotionAdapter: Send + Sync {
    /// Whether translational input is currently nonzero.
    fn has_translation_input(&self) -> bool;

    /// Requests a visual state transition.
    fn transition_to(&self, state: MotionState);
}

/// Motion adapter reporting no input and ignoring transitions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullMotion;

impl MotionAdapter for NullMotion {
    fn has_translation_input(&self) -> bool {
        false
    }

    fn transition_to(&self, _state: MotionState) {}
}
