//! Action tables: ordered stages of event-indexed handlers.
//!
//! A table is authored once per trigger slot and never mutated afterward.
//! Each stage holds one optional handler per [`ActionEvent`]; an absent
//! handler makes dispatch of that event a defined no-op. The dispatcher
//! never advances the chain on its own; moving between stages is always
//! an explicit decision made inside a handler.

use std::sync::Arc;

use crate::dispatch::ActionDispatcher;
use crate::event::ActionEvent;

/// A stage handler.
///
/// Handlers receive the dispatcher itself so they can read and mutate
/// ledgers, advance chains, raise new triggers, or clear the active slot.
/// The dispatcher clones the `Arc` before invoking, so a handler is free
/// to replace or deactivate the very stage it belongs to.
pub type StageHandler = Arc<dyn Fn(&mut ActionDispatcher) + Send + Sync>;

/// One chain link: a fixed-size array of optional handlers indexed by
/// event kind.
#[derive(Clone)]
pub struct Stage {
    handlers: [Option<StageHandler>; ActionEvent::COUNT],
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    pub fn new() -> Self {
        Self {
            handlers: std::array::from_fn(|_| None),
        }
    }

    /// Installs `handler` for `event`, replacing any previous handler.
    pub fn on(
        mut self,
        event: ActionEvent,
        handler: impl Fn(&mut ActionDispatcher) + Send + Sync + 'static,
    ) -> Self {
        self.handlers[event.as_index()] = Some(Arc::new(handler));
        self
    }

    /// Installs an already-shared handler for `event`.
    pub fn on_shared(mut self, event: ActionEvent, handler: StageHandler) -> Self {
        self.handlers[event.as_index()] = Some(handler);
        self
    }

    /// Returns the handler registered for `event`, if any.
    pub fn handler(&self, event: ActionEvent) -> Option<&StageHandler> {
        self.handlers[event.as_index()].as_ref()
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events = ActionEvent::all();
        let registered: Vec<&str> = events
            .iter()
            .filter(|event| self.handlers[event.as_index()].is_some())
            .map(|event| event.as_ref())
            .collect();
        f.debug_struct("Stage").field("handlers", &registered).finish()
    }
}

/// Ordered stage sequence for one trigger slot. Immutable after build.
#[derive(Clone, Debug)]
pub struct ActionTable {
    stages: Vec<Stage>,
}

impl ActionTable {
    pub fn builder() -> ActionTableBuilder {
        ActionTableBuilder { stages: Vec::new() }
    }

    /// Convenience constructor for tables with a single stage.
    pub fn single(stage: Stage) -> Self {
        Self {
            stages: vec![stage],
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the stage at `index`, if within the table.
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }
}

/// Builder validating table shape at construction time, so malformed
/// tables fail loudly when authored instead of silently at dispatch.
#[derive(Default)]
pub struct ActionTableBuilder {
    stages: Vec<Stage>,
}

impl ActionTableBuilder {
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> Result<ActionTable, crate::dispatch::ConfigError> {
        if self.stages.is_empty() {
            return Err(crate::dispatch::ConfigError::EmptyTable);
        }
        Ok(ActionTable {
            stages: self.stages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_rejected_at_build() {
        assert!(matches!(
            ActionTable::builder().build(),
            Err(crate::dispatch::ConfigError::EmptyTable)
        ));
    }

    #[test]
    fn absent_handlers_stay_absent() {
        let stage = Stage::new().on(ActionEvent::SetTrigger, |_| {});
        assert!(stage.handler(ActionEvent::SetTrigger).is_some());
        assert!(stage.handler(ActionEvent::CleanUp).is_none());
        assert!(stage.handler(ActionEvent::TransitionOccurred).is_none());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let stage = Stage::new()
            .on(ActionEvent::Cue, |_| {})
            .on(ActionEvent::Cue, |_| {});
        assert!(stage.handler(ActionEvent::Cue).is_some());
    }
}
