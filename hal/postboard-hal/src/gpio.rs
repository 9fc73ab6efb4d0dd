//! GPIO pin abstractions
//!
//! Provides the digital input trait used for the mode button.

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Build a level from a boolean (`true` is high)
    pub fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Check if this is the high level
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if this is the low level
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Read the current level
    fn level(&self) -> Level {
        Level::from_high(self.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_level_from_pin() {
        assert_eq!(FixedPin(true).level(), Level::High);
        assert_eq!(FixedPin(false).level(), Level::Low);
        assert!(FixedPin(false).is_low());
    }

    #[test]
    fn test_level_helpers() {
        assert!(Level::from_high(true).is_high());
        assert!(Level::from_high(false).is_low());
        assert!(!Level::High.is_low());
    }
}
