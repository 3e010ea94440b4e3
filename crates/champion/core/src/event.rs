//! Lifecycle event vocabulary for action stages.
//!
//! Every stage of an action table is an array of optional handlers indexed
//! by [`ActionEvent`]. The discriminants are stable and double as array
//! indices, so the enum must stay dense (no gaps) and `COUNT` must match
//! the number of variants.

/// Events delivered to the active stage of an action table.
///
/// `SetTrigger` is raised by trigger arbitration when a slot activates.
/// The animation host delivers `Standby → Cue → Exit → End → CleanUp` in
/// that order over one execution, though pre-emption means any suffix of
/// that sequence may never arrive. `OnHeartBeat` and `OnFixedUpdate` come
/// from the simulation drivers, `OnRelax` from the idle loop, and
/// `TransitionOccurred` is delivered to a slot being superseded by
/// another trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ActionEvent {
    /// One-time setup when a table is installed.
    Initialize = 0,
    /// Trigger arbitration accepted this slot.
    SetTrigger = 1,
    /// Cast wind-up begins.
    Begin = 2,
    /// Animation reached its standby frame.
    Standby = 3,
    /// Animation reached its cue (impact) frame.
    Cue = 4,
    /// Animation is leaving the active portion.
    Exit = 5,
    /// Animation finished playing.
    End = 6,
    /// Final cleanup for this execution.
    CleanUp = 7,
    /// Fixed-step simulation heartbeat (resource decay already applied).
    OnHeartBeat = 8,
    /// Physics-rate update.
    OnFixedUpdate = 9,
    /// Character has been idle long enough to relax.
    OnRelax = 10,
    /// Another slot is about to take over while this one is active.
    TransitionOccurred = 11,
}

impl ActionEvent {
    /// Total number of event kinds; the length of every stage's handler array.
    pub const COUNT: usize = 12;

    /// Returns all event kinds in discriminant order.
    pub const fn all() -> [ActionEvent; Self::COUNT] {
        [
            ActionEvent::Initialize,
            ActionEvent::SetTrigger,
            ActionEvent::Begin,
            ActionEvent::Standby,
            ActionEvent::Cue,
            ActionEvent::Exit,
            ActionEvent::End,
            ActionEvent::CleanUp,
            ActionEvent::OnHeartBeat,
            ActionEvent::OnFixedUpdate,
            ActionEvent::OnRelax,
            ActionEvent::TransitionOccurred,
        ]
    }

    /// Returns the event as a handler-array index.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_are_dense_indices() {
        for (expected, event) in ActionEvent::all().into_iter().enumerate() {
            assert_eq!(event.as_index(), expected);
        }
    }

    #[test]
    fn count_matches_variant_list() {
        assert_eq!(ActionEvent::all().len(), ActionEvent::COUNT);
    }
}
