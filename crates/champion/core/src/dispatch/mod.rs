//! Trigger arbitration and lifecycle event dispatch.
//!
//! [`ActionDispatcher`] is the authoritative owner of one character's
//! action state: the registered tables with their ledgers and contexts,
//! the single active slot, and the action point pool. Every mutation
//! flows through it synchronously (a trigger call, a host lifecycle
//! callback, or the per-tick heartbeat) and runs to completion before
//! returning.
//!
//! # Re-entrancy
//!
//! Stage handlers receive `&mut ActionDispatcher` and may call back into
//! it: raise another trigger, clear the active slot, or mutate ledgers.
//! The dispatcher therefore clones the handler `Arc` before invoking and
//! re-reads the active slot after every handler call instead of caching
//! it. Handlers must assume the same of any handler they cause to run.

mod errors;

pub use errors::{ConfigError, TriggerError};

use std::sync::Arc;

use crate::context::{EntityId, EventContext};
use crate::event::ActionEvent;
use crate::host::{HostEnv, MotionState, TargetCandidate, TriggerSource};
use crate::meter::ActionPointMeter;
use crate::status::ActionStatus;
use crate::table::{ActionTable, StageHandler};

/// Identifies one input trigger slot (one registered action table).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(pub usize);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// One registered slot: table, ledger, and scratch context together.
struct Slot {
    table: ActionTable,
    status: ActionStatus,
    context: EventContext,
}

/// Action execution core for one character.
pub struct ActionDispatcher {
    slots: Vec<Option<Slot>>,
    active: Option<SlotId>,
    caster: EntityId,
    action_points: ActionPointMeter,
    host: HostEnv,
}

impl ActionDispatcher {
    /// Creates a dispatcher for `caster` with no registered slots and an
    /// empty action point pool.
    pub fn new(caster: EntityId, host: HostEnv) -> Self {
        Self {
            slots: Vec::new(),
            active: None,
            caster,
            action_points: ActionPointMeter::default(),
            host,
        }
    }

    /// Sets the action point pool, filled to `maximum`.
    pub fn with_action_points(mut self, maximum: u32) -> Self {
        self.action_points = ActionPointMeter::new(maximum);
        self
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Installs `table` with its `status` ledger on `slot`.
    ///
    /// Validates chain/stage consistency: a multi-stage table must
    /// declare a chain length equal to its stage count, a single-stage
    /// table at most 1. If stage 0 carries an
    /// [`Initialize`](ActionEvent::Initialize) handler it runs once, here,
    /// with the slot not active.
    pub fn register(
        &mut self,
        slot: SlotId,
        table: ActionTable,
        status: ActionStatus,
    ) -> Result<(), ConfigError> {
        let stages = table.stage_count();
        let chain_max = status.maximum_chain();
        let consistent = if stages > 1 {
            chain_max == stages
        } else {
            chain_max <= 1
        };
        if !consistent {
            return Err(ConfigError::ChainMismatch { stages, chain_max });
        }

        let initialize = table
            .stage(0)
            .and_then(|stage| stage.handler(ActionEvent::Initialize))
            .cloned();

        if self.slots.len() <= slot.0 {
            self.slots.resize_with(slot.0 + 1, || None);
        }
        self.slots[slot.0] = Some(Slot {
            table,
            status,
            context: EventContext::new(),
        });
        self.host.presentation().on_status_update();

        if let Some(handler) = initialize {
            tracing::trace!(%slot, "running initialize handler");
            handler(self);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Trigger arbitration
    // ------------------------------------------------------------------

    /// Arbitrates a trigger from `source` against `slot`.
    ///
    /// Checks run in order, each short-circuiting: unknown slot, slot on
    /// cooldown, active context transition-restricted. If another slot is
    /// active, its current stage receives
    /// [`TransitionOccurred`](ActionEvent::TransitionOccurred) first.
    /// That dispatch does not itself deactivate anything; whether the
    /// pre-empted stage cleans up is its own handler's decision. Only
    /// then is `source` marked busy, the slot made active, its context
    /// armed, and [`SetTrigger`](ActionEvent::SetTrigger) dispatched.
    ///
    /// A rejection leaves every ledger, context, and the active slot
    /// untouched and fires no events.
    pub fn trigger(
        &mut self,
        source: Arc<dyn TriggerSource>,
        slot: SlotId,
    ) -> Result<(), TriggerError> {
        let remaining = match self.slot_entry(slot) {
            Some(entry) => entry.status.cooldown(),
            None => return Err(TriggerError::UnknownSlot { slot }),
        };
        if remaining > 0 {
            tracing::debug!(%slot, remaining, "trigger rejected: on cooldown");
            return Err(TriggerError::OnCooldown { slot, remaining });
        }

        if let Some(active) = self.active {
            let restricted = self
                .slot_entry(active)
                .map(|entry| entry.context.restrict_transition)
                .unwrap_or(false);
            if restricted {
                tracing::debug!(%slot, %active, "trigger rejected: transition locked");
                return Err(TriggerError::TransitionLocked { active });
            }
            if active != slot {
                tracing::debug!(%slot, %active, "pre-empting active slot");
                self.dispatch(ActionEvent::TransitionOccurred);
            }
        }

        source.set_busy(true);
        self.active = Some(slot);
        let caster = self.caster;
        if let Some(entry) = self.slot_entry_mut(slot) {
            entry.context.arm(source, caster);
        }
        tracing::debug!(%slot, "trigger accepted");

        self.dispatch(ActionEvent::SetTrigger);
        self.host.presentation().on_status_update();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------

    /// Delivers `event` to the active stage.
    ///
    /// Returns `false` without side effects when no slot is active or the
    /// current stage has no handler for `event`. The active slot is
    /// re-read after the handler returns; handlers may have changed it.
    pub fn dispatch(&mut self, event: ActionEvent) -> bool {
        let Some(handler) = self.active_handler(event) else {
            tracing::trace!(%event, "dispatch: unhandled");
            return false;
        };
        tracing::trace!(%event, slot = ?self.active, "dispatch");
        handler(self);
        true
    }

    fn active_handler(&self, event: ActionEvent) -> Option<StageHandler> {
        let slot = self.active?;
        let entry = self.slot_entry(slot)?;
        let stage = entry.table.stage(entry.status.chain())?;
        stage.handler(event).cloned()
    }

    // ------------------------------------------------------------------
    // Host-driven lifecycle
    // ------------------------------------------------------------------

    /// Animation host: cast reached its standby frame.
    pub fn on_cast_standby(&mut self) -> bool {
        self.dispatch(ActionEvent::Standby)
    }

    /// Animation host: cast reached its cue (impact) frame.
    pub fn on_cast_cue(&mut self) -> bool {
        self.dispatch(ActionEvent::Cue)
    }

    /// Animation host: cast is leaving its active portion.
    pub fn on_cast_exit(&mut self) -> bool {
        self.dispatch(ActionEvent::Exit)
    }

    /// Animation host: cast animation finished.
    pub fn on_cast_end(&mut self) -> bool {
        self.dispatch(ActionEvent::End)
    }

    /// Animation host: final cleanup point for this execution.
    pub fn on_cast_cleanup(&mut self) -> bool {
        self.dispatch(ActionEvent::CleanUp)
    }

    /// Physics-rate update from the host scheduler.
    pub fn on_fixed_update(&mut self) -> bool {
        self.dispatch(ActionEvent::OnFixedUpdate)
    }

    /// Idle loop: the character has been standing around long enough.
    pub fn on_idle_relax(&mut self) -> bool {
        self.dispatch(ActionEvent::OnRelax)
    }

    /// Fixed-step simulation heartbeat.
    ///
    /// Decays every registered ledger, not only the active slot's,
    /// before the active stage sees
    /// [`OnHeartBeat`](ActionEvent::OnHeartBeat), so heartbeat handlers
    /// can rely on cross-slot resource reads being current.
    pub fn on_heartbeat(&mut self) {
        let mut changed = false;
        for entry in self.slots.iter_mut().flatten() {
            changed |= entry.status.heartbeat();
        }
        if changed {
            self.host.presentation().on_status_update();
        }
        self.dispatch(ActionEvent::OnHeartBeat);
    }

    // ------------------------------------------------------------------
    // Cleanup
    // ------------------------------------------------------------------

    /// Default end-of-cast reset: frees the trigger source, clears the
    /// active context, deactivates the slot (returning the presentation
    /// layer to its default mode), and hands the animator back to `Idle`
    /// or `Moving` depending on current translation input.
    pub fn reset_from_cast(&mut self) {
        self.release_active();
        let state = if self.host.motion().has_translation_input() {
            MotionState::Moving
        } else {
            MotionState::Idle
        };
        self.host.motion().transition_to(state);
    }

    /// Frees the active slot without touching the animator: clears the
    /// trigger source's busy flag, resets the context, and sets the
    /// active slot to none. Intended for
    /// [`TransitionOccurred`](ActionEvent::TransitionOccurred) handlers
    /// that yield to an incoming action.
    pub fn release_active(&mut self) {
        if let Some(slot) = self.active
            && let Some(entry) = self.slot_entry_mut(slot)
        {
            if let Some(trigger) = entry.context.trigger() {
                trigger.set_busy(false);
            }
            entry.context.clear();
        }
        if self.active.take().is_some() {
            self.host.presentation().on_default_mode();
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn active_slot(&self) -> Option<SlotId> {
        self.active
    }

    pub fn caster(&self) -> EntityId {
        self.caster
    }

    pub fn host(&self) -> &HostEnv {
        &self.host
    }

    pub fn action_points(&self) -> &ActionPointMeter {
        &self.action_points
    }

    pub fn action_points_mut(&mut self) -> &mut ActionPointMeter {
        &mut self.action_points
    }

    pub fn status(&self, slot: SlotId) -> Option<&ActionStatus> {
        self.slot_entry(slot).map(|entry| &entry.status)
    }

    pub fn status_mut(&mut self, slot: SlotId) -> Option<&mut ActionStatus> {
        self.slot_entry_mut(slot).map(|entry| &mut entry.status)
    }

    pub fn context(&self, slot: SlotId) -> Option<&EventContext> {
        self.slot_entry(slot).map(|entry| &entry.context)
    }

    pub fn context_mut(&mut self, slot: SlotId) -> Option<&mut EventContext> {
        self.slot_entry_mut(slot).map(|entry| &mut entry.context)
    }

    pub fn active_status(&self) -> Option<&ActionStatus> {
        self.status(self.active?)
    }

    pub fn active_status_mut(&mut self) -> Option<&mut ActionStatus> {
        let slot = self.active?;
        self.status_mut(slot)
    }

    pub fn active_context(&self) -> Option<&EventContext> {
        self.context(self.active?)
    }

    pub fn active_context_mut(&mut self) -> Option<&mut EventContext> {
        let slot = self.active?;
        self.context_mut(slot)
    }

    /// Nearest targeting candidate within `radius`, if any.
    pub fn acquire_target(&self, radius: f32) -> Option<TargetCandidate> {
        self.host.nearest_target(radius)
    }

    /// Asks the presentation layer to refresh after direct ledger
    /// mutation from a handler.
    pub fn notify_status_changed(&self) {
        self.host.presentation().on_status_update();
    }

    fn slot_entry(&self, slot: SlotId) -> Option<&Slot> {
        self.slots.get(slot.0)?.as_ref()
    }

    fn slot_entry_mut(&mut self, slot: SlotId) -> Option<&mut Slot> {
        self.slots.get_mut(slot.0)?.as_mut()
    }
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("caster", &self.caster)
            .field("slots", &self.slots.iter().filter(|s| s.is_some()).count())
            .field("active", &self.active)
            .field("action_points", &self.action_points)
            .finish_non_exhaustive()
    }
}

/// Reusable default [`CleanUp`](ActionEvent::CleanUp) handler wrapping
/// [`ActionDispatcher::reset_from_cast`].
pub fn default_reset() -> StageHandler {
    Arc::new(|dispatcher: &mut ActionDispatcher| dispatcher.reset_from_cast())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Stage;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    #[derive(Default)]
    struct TestTrigger {
        busy: AtomicBool,
    }

    impl TriggerSource for TestTrigger {
        fn set_busy(&self, busy: bool) {
            self.busy.store(busy, Ordering::SeqCst);
        }

        fn is_busy(&self) -> bool {
            self.busy.load(Ordering::SeqCst)
        }
    }

    fn dispatcher() -> ActionDispatcher {
        ActionDispatcher::new(EntityId(7), HostEnv::null())
    }

    #[test]
    fn trigger_on_unregistered_slot_is_rejected() {
        let mut d = dispatcher();
        let source = Arc::new(TestTrigger::default());
        let err = d.trigger(source, SlotId(0)).unwrap_err();
        assert_eq!(err, TriggerError::UnknownSlot { slot: SlotId(0) });
    }

    #[test]
    fn register_rejects_chain_mismatch() {
        let mut d = dispatcher();
        let table = ActionTable::builder()
            .stage(Stage::new())
            .stage(Stage::new())
            .build()
            .unwrap();
        let err = d
            .register(SlotId(0), table, ActionStatus::new().with_chain(3))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ChainMismatch {
                stages: 2,
                chain_max: 3
            }
        );
    }

    #[test]
    fn register_rejects_multi_chain_on_single_stage() {
        let mut d = dispatcher();
        let table = ActionTable::single(Stage::new());
        assert!(
            d.register(SlotId(0), table, ActionStatus::new().with_chain(2))
                .is_err()
        );
    }

    #[test]
    fn initialize_runs_once_at_registration() {
        let runs = Arc::new(AtomicU32::new(0));
        let counter = runs.clone();
        let table = ActionTable::single(Stage::new().on(ActionEvent::Initialize, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let mut d = dispatcher();
        d.register(SlotId(0), table, ActionStatus::new()).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(d.active_slot().is_none());
    }

    #[test]
    fn dispatch_without_active_slot_is_noop() {
        let mut d = dispatcher();
        assert!(!d.dispatch(ActionEvent::Cue));
        assert!(!d.dispatch(ActionEvent::Cue));
    }

    #[test]
    fn accepted_trigger_marks_source_busy_and_arms_context() {
        let mut d = dispatcher();
        let table = ActionTable::single(Stage::new().on(ActionEvent::SetTrigger, |_| {}));
        d.register(SlotId(0), table, ActionStatus::new()).unwrap();

        let source = Arc::new(TestTrigger::default());
        d.trigger(source.clone(), SlotId(0)).unwrap();

        assert!(source.is_busy());
        assert_eq!(d.active_slot(), Some(SlotId(0)));
        let context = d.active_context().unwrap();
        assert_eq!(context.caster(), Some(EntityId(7)));
        assert!(context.trigger().is_some());
    }

    #[test]
    fn handler_may_retrigger_reentrantly() {
        // Slot 0's SetTrigger immediately requests slot 1; the dispatcher
        // must tolerate the active slot changing mid-dispatch.
        let source_b = Arc::new(TestTrigger::default());
        let reentry = source_b.clone();
        let table_a = ActionTable::single(Stage::new().on(ActionEvent::SetTrigger, move |d| {
            let _ = d.trigger(reentry.clone(), SlotId(1));
        }));
        let table_b = ActionTable::single(Stage::new().on(ActionEvent::SetTrigger, |_| {}));

        let mut d = dispatcher();
        d.register(SlotId(0), table_a, ActionStatus::new()).unwrap();
        d.register(SlotId(1), table_b, ActionStatus::new()).unwrap();

        let source_a = Arc::new(TestTrigger::default());
        d.trigger(source_a, SlotId(0)).unwrap();
        assert_eq!(d.active_slot(), Some(SlotId(1)));
    }

    #[test]
    fn release_active_frees_busy_flag_and_context() {
        let mut d = dispatcher();
        let table = ActionTable::single(Stage::new().on(ActionEvent::SetTrigger, |_| {}));
        d.register(SlotId(0), table, ActionStatus::new()).unwrap();

        let source = Arc::new(TestTrigger::default());
        d.trigger(source.clone(), SlotId(0)).unwrap();
        d.release_active();

        assert!(!source.is_busy());
        assert!(d.active_slot().is_none());
        let context = d.context(SlotId(0)).unwrap();
        assert!(context.trigger().is_none());
        assert!(context.caster().is_none());
    }
}
