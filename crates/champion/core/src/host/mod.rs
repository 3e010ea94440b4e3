//! Capabilities the host supplies to the action core.
//!
//! The core never reaches for ambient singletons: everything it needs
//! from the surrounding game (input busy flags, HUD refresh, animation
//! state, target queries) arrives as a trait object bundled in
//! [`HostEnv`] at dispatcher construction. Null implementations are
//! provided for tools and tests that exercise the core in isolation.

mod motion;
mod presentation;
mod targeting;
mod trigger;

pub use motion::{MotionAdapter, MotionState, NullMotion};
pub use presentation::{NullPresentation, PresentationHook};
pub use targeting::{NullTargeting, TargetCandidate, TargetingOracle};
pub use trigger::TriggerSource;

use std::sync::Arc;

/// Aggregates the host capabilities consumed by the dispatcher.
#[derive(Clone)]
pub struct HostEnv {
    presentation: Arc<dyn PresentationHook>,
    motion: Arc<dyn MotionAdapter>,
    targeting: Arc<dyn TargetingOracle>,
}

impl HostEnv {
    pub fn new(
        presentation: Arc<dyn PresentationHook>,
        motion: Arc<dyn MotionAdapter>,
        targeting: Arc<dyn TargetingOracle>,
    ) -> Self {
        Self {
            presentation,
            motion,
            targeting,
        }
    }

    /// Environment where every capability is a no-op.
    pub fn null() -> Self {
        Self {
            presentation: Arc::new(NullPresentation),
            motion: Arc::new(NullMotion),
            targeting: Arc::new(NullTargeting),
        }
    }

    /// Replaces the presentation hook.
    pub fn with_presentation(mut self, presentation: Arc<dyn PresentationHook>) -> Self {
        self.presentation = presentation;
        self
    }

    /// Replaces the motion adapter.
    pub fn with_motion(mut self, motion: Arc<dyn MotionAdapter>) -> Self {
        self.motion = motion;
        self
    }

    /// Replaces the targeting oracle.
    pub fn with_targeting(mut self, targeting: Arc<dyn TargetingOracle>) -> Self {
        self.targeting = targeting;
        self
    }

    pub fn presentation(&self) -> &dyn PresentationHook {
        self.presentation.as_ref()
    }

    pub fn motion(&self) -> &dyn MotionAdapter {
        self.motion.as_ref()
    }

    pub fn targeting(&self) -> &dyn TargetingOracle {
        self.targeting.as_ref()
    }

    /// Queries the targeting oracle and returns the candidate nearest to
    /// the caster, if any lie within `radius`.
    pub fn nearest_target(&self, radius: f32) -> Option<TargetCandidate> {
        self.targeting
            .candidates_in_radius(radius)
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl std::fmt::Debug for HostEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostEnv").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EntityId;

    struct FixedTargets(Vec<TargetCandidate>);

    impl TargetingOracle for FixedTargets {
        fn candidates_in_radius(&self, radius: f32) -> Vec<TargetCandidate> {
            self.0
                .iter()
                .filter(|c| c.distance <= radius)
                .cloned()
                .collect()
        }
    }

    #[test]
    fn nearest_target_picks_minimum_distance() {
        let env = HostEnv::null().with_targeting(Arc::new(FixedTargets(vec![
            TargetCandidate::new(EntityId(1), 4.0),
            TargetCandidate::new(EntityId(2), 1.5),
            TargetCandidate::new(EntityId(3), 2.5),
        ])));

        let best = env.nearest_target(5.0).unwrap();
        assert_eq!(best.id, EntityId(2));
    }

    #[test]
    fn nearest_target_respects_radius() {
        let env = HostEnv::null().with_targeting(Arc::new(FixedTargets(vec![
            TargetCandidate::new(EntityId(1), 4.0),
        ])));

        assert!(env.nearest_target(3.0).is_none());
    }

    #[test]
    fn null_env_has_no_targets() {
        assert!(HostEnv::null().nearest_target(100.0).is_none());
    }
}
