//! Button debouncing
//!
//! The mode button is active-low with a pull-up. A press is accepted on a
//! high → low edge, and only if more than the debounce window has passed since
//! the previous accepted press. Releases never produce events.

use postboard_hal::{InputPin, Level};

/// Edge detector with a minimum interval between presses
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    last_level: Level,
    last_press_ms: u32,
    window_ms: u32,
}

impl ButtonDebouncer {
    /// Create a debouncer; the button is assumed released
    pub const fn new(window_ms: u32) -> Self {
        Self {
            last_level: Level::High,
            last_press_ms: 0,
            window_ms,
        }
    }

    /// Feed one raw sample taken at `now_ms`
    ///
    /// Returns true exactly once per accepted press.
    pub fn sample(&mut self, level: Level, now_ms: u32) -> bool {
        let falling = self.last_level.is_high() && level.is_low();
        self.last_level = level;

        if falling && now_ms.wrapping_sub(self.last_press_ms) > self.window_ms {
            self.last_press_ms = now_ms;
            return true;
        }
        false
    }

    /// Sample a pin directly
    pub fn poll<P: InputPin>(&mut self, pin: &P, now_ms: u32) -> bool {
        self.sample(pin.level(), now_ms)
    }
}
