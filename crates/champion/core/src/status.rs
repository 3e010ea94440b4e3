//! Per-slot resource ledger: cooldown, stacks, and chain position.
//!
//! One [`ActionStatus`] exists per registered action table. The dispatcher
//! decays every ledger once per heartbeat regardless of which slot is
//! active; everything else (arming a cooldown, spending a stack, moving
//! the chain) is driven explicitly by stage handlers.

/// Cooldown, stack, and chain counters for one action table.
///
/// Authoring setters (`set_*` / `with_*`) write the maximum and the
/// current value together, matching how tables are declared once at
/// initialization. Invariants: `stack <= maximum_stack` and
/// `chain < max(maximum_chain, 1)` hold after every mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionStatus {
    cooldown: u32,
    maximum_cooldown: u32,
    stack_cooldown: u32,
    maximum_stack_cooldown: u32,
    stack: u32,
    maximum_stack: u32,
    chain: usize,
    maximum_chain: usize,
}

impl ActionStatus {
    /// Creates a ledger with every counter at zero (single-stage, no
    /// cooldown, no stacks).
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Authoring setters: maximum and current move together.
    // ------------------------------------------------------------------

    /// Sets both maximum and current cooldown.
    pub fn set_cooldown(&mut self, ticks: u32) -> &mut Self {
        self.maximum_cooldown = ticks;
        self.cooldown = ticks;
        self
    }

    /// Sets both maximum and current stack-regeneration timer.
    pub fn set_stack_cooldown(&mut self, ticks: u32) -> &mut Self {
        self.maximum_stack_cooldown = ticks;
        self.stack_cooldown = ticks;
        self
    }

    /// Sets both maximum and current stack count.
    pub fn set_stack(&mut self, stacks: u32) -> &mut Self {
        self.maximum_stack = stacks;
        self.stack = stacks;
        self
    }

    /// Sets the chain length (number of stages the chain cycles through).
    pub fn set_chain(&mut self, length: usize) -> &mut Self {
        self.maximum_chain = length;
        self.chain = 0;
        self
    }

    /// By-value variant of [`set_cooldown`](Self::set_cooldown) for
    /// declaration chains.
    pub fn with_cooldown(mut self, ticks: u32) -> Self {
        self.set_cooldown(ticks);
        self
    }

    /// By-value variant of [`set_stack_cooldown`](Self::set_stack_cooldown).
    pub fn with_stack_cooldown(mut self, ticks: u32) -> Self {
        self.set_stack_cooldown(ticks);
        self
    }

    /// By-value variant of [`set_stack`](Self::set_stack).
    pub fn with_stack(mut self, stacks: u32) -> Self {
        self.set_stack(stacks);
        self
    }

    /// By-value variant of [`set_chain`](Self::set_chain).
    pub fn with_chain(mut self, length: usize) -> Self {
        self.set_chain(length);
        self
    }

    // ------------------------------------------------------------------
    // Runtime mutators.
    // ------------------------------------------------------------------

    /// Rearms the cooldown at its configured maximum.
    pub fn begin_cooldown(&mut self) {
        self.cooldown = self.maximum_cooldown;
    }

    /// Overrides the remaining cooldown without touching the maximum.
    pub fn set_remaining_cooldown(&mut self, ticks: u32) {
        self.cooldown = ticks;
    }

    /// Consumes one stack. Returns `false` (and changes nothing) when no
    /// stack is available.
    pub fn spend_stack(&mut self) -> bool {
        if self.stack == 0 {
            return false;
        }
        self.stack -= 1;
        true
    }

    /// Moves the chain to `index`, wrapping to 0 whenever the index would
    /// reach or exceed the chain length.
    pub fn set_chain_index(&mut self, index: usize) {
        self.chain = if self.maximum_chain == 0 || index >= self.maximum_chain {
            0
        } else {
            index
        };
    }

    /// Advances the chain by one link, wrapping at the chain length.
    pub fn advance_chain(&mut self) {
        self.set_chain_index(self.chain + 1);
    }

    /// Applies one heartbeat of decay/regeneration. Returns `true` when
    /// any observable field changed (used to drive presentation refresh).
    ///
    /// The stack timer restarts immediately upon granting a stack, so a
    /// full regeneration cycle is exactly `maximum_stack_cooldown` ticks.
    pub fn heartbeat(&mut self) -> bool {
        let mut changed = false;

        if self.cooldown > 0 {
            self.cooldown -= 1;
            changed = true;
        }

        if self.stack_cooldown > 0 {
            self.stack_cooldown -= 1;
            changed = true;
        }
        if self.stack_cooldown == 0 && self.stack < self.maximum_stack {
            self.stack_cooldown = self.maximum_stack_cooldown;
            self.stack += 1;
            changed = true;
        }

        changed
    }

    // ------------------------------------------------------------------
    // Accessors.
    // ------------------------------------------------------------------

    /// Remaining cooldown in ticks. A trigger is rejected while nonzero.
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn maximum_cooldown(&self) -> u32 {
        self.maximum_cooldown
    }

    pub fn stack(&self) -> u32 {
        self.stack
    }

    pub fn maximum_stack(&self) -> u32 {
        self.maximum_stack
    }

    pub fn stack_cooldown(&self) -> u32 {
        self.stack_cooldown
    }

    /// Current chain index; always a valid stage index for the paired table.
    pub fn chain(&self) -> usize {
        self.chain
    }

    /// Chain length. 0 means a single-stage table pinned at index 0.
    pub fn maximum_chain(&self) -> usize {
        self.maximum_chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_decays_to_zero_and_stops() {
        let mut status = ActionStatus::new().with_cooldown(3);
        for expected in [2, 1, 0, 0, 0] {
            status.heartbeat();
            assert_eq!(status.cooldown(), expected);
        }
    }

    #[test]
    fn stack_regenerates_on_timer_expiry() {
        let mut status = ActionStatus::new().with_stack(3).with_stack_cooldown(2);
        // Spend everything so regeneration has room to work.
        assert!(status.spend_stack());
        assert!(status.spend_stack());
        assert!(status.spend_stack());
        assert!(!status.spend_stack());
        assert_eq!(status.stack(), 0);
        // Timer was left mid-countdown by authoring; restart it cleanly.
        status.set_stack_cooldown(2);

        status.heartbeat();
        assert_eq!(status.stack(), 0);
        status.heartbeat();
        assert_eq!(status.stack(), 1);
        // Timer restarted the moment the stack was granted.
        assert_eq!(status.stack_cooldown(), 2);
    }

    #[test]
    fn stack_never_exceeds_maximum() {
        let mut status = ActionStatus::new().with_stack(2).with_stack_cooldown(1);
        for _ in 0..10 {
            status.heartbeat();
        }
        assert_eq!(status.stack(), 2);
    }

    #[test]
    fn chain_wraps_at_maximum() {
        let mut status = ActionStatus::new().with_chain(3);
        let mut seen = Vec::new();
        for _ in 0..7 {
            seen.push(status.chain());
            status.advance_chain();
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn zero_length_chain_stays_pinned() {
        let mut status = ActionStatus::new();
        status.advance_chain();
        status.set_chain_index(5);
        assert_eq!(status.chain(), 0);
    }

    #[test]
    fn authoring_setters_write_maximum_and_current() {
        let mut status = ActionStatus::new();
        status.set_cooldown(7).set_stack(2).set_stack_cooldown(4);
        assert_eq!(status.cooldown(), 7);
        assert_eq!(status.maximum_cooldown(), 7);
        assert_eq!(status.stack(), 2);
        assert_eq!(status.maximum_stack(), 2);
        assert_eq!(status.stack_cooldown(), 4);
    }
}
