//! Error types for table registration and trigger arbitration.

use super::SlotId;

/// Malformed authoring configuration, surfaced at build/registration
/// time rather than discovered at dispatch time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("action table has no stages")]
    EmptyTable,

    #[error("chain length {chain_max} does not match stage count {stages}")]
    ChainMismatch { stages: usize, chain_max: usize },
}

/// Why a trigger attempt was turned away.
///
/// A rejection is final for that attempt and leaves every ledger,
/// context, and the active slot untouched; the input layer may simply
/// re-issue the trigger on a later tick. Callers that want the legacy
/// fire-and-forget behavior can ignore the error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("no action table registered for {slot}")]
    UnknownSlot { slot: SlotId },

    #[error("{slot} is on cooldown ({remaining} ticks remaining)")]
    OnCooldown { slot: SlotId, remaining: u32 },

    #[error("active {active} restricts transitions")]
    TransitionLocked { active: SlotId },
}
