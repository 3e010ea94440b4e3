//! Ability execution core for a melee-combat character.
//!
//! `champion-core` decides, per input trigger slot, which multi-stage
//! action sequence is executing, gates re-triggering through cooldown,
//! stack, and chain ledgers, and forwards lifecycle events from the host
//! (input, animation, simulation tick) to stage-authored handlers. All
//! state mutation flows through [`dispatch::ActionDispatcher`]; the
//! surrounding game is reached only through the capabilities in
//! [`host`].
pub mod context;
pub mod dispatch;
pub mod event;
pub mod host;
pub mod meter;
pub mod status;
pub mod table;

pub use context::{EntityId, EventContext};
pub use dispatch::{ActionDispatcher, ConfigError, SlotId, TriggerError, default_reset};
pub use event::ActionEvent;
pub use host::{
    HostEnv, MotionAdapter, MotionState, NullMotion, NullPresentation, NullTargeting,
    PresentationHook, TargetCandidate, TargetingOracle, TriggerSource,
};
pub use meter::ActionPointMeter;
pub use status::ActionStatus;
pub use table::{ActionTable, ActionTableBuilder, Stage, StageHandler};
