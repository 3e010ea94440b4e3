//! Input-source capability.

/// An input source (button, gesture, AI intent) that can raise triggers.
///
/// The dispatcher marks the source busy when its trigger is accepted and
/// clears the flag during default cleanup, preventing immediate
/// re-triggering from the same input while an execution is in flight.
/// Implementations use interior mutability; the dispatcher only ever
/// holds shared references.
pub trait TriggerSource: Send + Sync {
    fn set_busy(&self, busy: bool);

    fn is_busy(&self) -> bool;
}
