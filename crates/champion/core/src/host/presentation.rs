//! Presentation-layer notifications.

/// Outbound notifications toward HUD/UI.
///
/// Both calls are advisory side effects: the core fires them at defined
/// points but never depends on them for correctness, and implementations
/// must not call back into the dispatcher.
pub trait PresentationHook: Send + Sync {
    /// Some ledger field changed; cooldown/stack indicators should refresh.
    fn on_status_update(&self);

    /// The active slot became none; the UI should return to its default
    /// "playing" mode.
    fn on_default_mode(&self);
}

/// Presentation hook that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

impl PresentationHook for NullPresentation {
    fn on_status_update(&self) {}

    fn on_default_mode(&self) {}
}
