//! Champion-wide action point meter.

/// Current/maximum action point pool owned by the dispatcher.
///
/// Kits may gate expensive stages on [`spend`](ActionPointMeter::spend);
/// the meter itself never regenerates on its own; refilling it is host
/// or kit logic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPointMeter {
    current: u32,
    maximum: u32,
}

impl ActionPointMeter {
    /// Creates a meter filled to `maximum`.
    pub fn new(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Fill ratio in `0.0..=1.0`; an empty maximum reads as 0.
    pub fn rate(&self) -> f32 {
        if self.maximum == 0 {
            0.0
        } else {
            self.current as f32 / self.maximum as f32
        }
    }

    /// Spends `amount` points. Returns `false` (and changes nothing) when
    /// fewer than `amount` are available.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Restores `amount` points, clamped to the maximum.
    pub fn restore(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.maximum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_rejects_overdraw() {
        let mut meter = ActionPointMeter::new(5);
        assert!(meter.spend(3));
        assert!(!meter.spend(3));
        assert_eq!(meter.current(), 2);
    }

    #[test]
    fn restore_clamps_to_maximum() {
        let mut meter = ActionPointMeter::new(4);
        meter.spend(2);
        meter.restore(10);
        assert_eq!(meter.current(), 4);
    }

    #[test]
    fn rate_handles_zero_maximum() {
        assert_eq!(ActionPointMeter::default().rate(), 0.0);
        assert_eq!(ActionPointMeter::new(8).rate(), 1.0);
    }
}
