//! Target-query capability.

use crate::context::EntityId;

/// One candidate returned by a radius query.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetCandidate {
    pub id: EntityId,
    /// Distance from the caster, in whatever unit the host uses.
    pub distance: f32,
}

impl TargetCandidate {
    pub fn new(id: EntityId, distance: f32) -> Self {
        Self { id, distance }
    }
}

/// Read-only target queries around the caster.
///
/// The oracle answers "who is within `radius` of the caster"; the core
/// only ever consumes the nearest candidate (see
/// [`HostEnv::nearest_target`](crate::host::HostEnv::nearest_target)).
pub trait TargetingOracle: Send + Sync {
    fn candidates_in_radius(&self, radius: f32) -> Vec<TargetCandidate>;
}

/// Targeting oracle that never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTargeting;

impl TargetingOracle for NullTargeting {
    fn candidates_in_radius(&self, _radius: f32) -> Vec<TargetCandidate> {
        Vec::new()
    }
}
