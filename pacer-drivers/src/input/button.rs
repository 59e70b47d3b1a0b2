//! Debounced push-button input
//!
//! Samples a GPIO pin each time the engine polls for input and reports a
//! press or release once the pin has held its new level for the configured
//! number of consecutive polls.

use embedded_hal::digital::InputPin;
use pacer_core::traits::{InputEvent, InputSource};

/// Button configuration
#[derive(Debug, Clone, Copy)]
pub struct ButtonConfig {
    /// Consecutive identical samples required to accept a level change
    pub debounce_polls: u8,
    /// Pressed reads as low (button to ground with pull-up)
    pub active_low: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_polls: 2, // 20 ms at the 10 ms render cadence
            active_low: true,
        }
    }
}

/// Push button acting as a single-point pointer
pub struct ButtonInput<P> {
    pin: P,
    config: ButtonConfig,
    /// Debounced state
    pressed: bool,
    /// Samples that disagreed with the debounced state in a row
    counter: u8,
}

impl<P: InputPin> ButtonInput<P> {
    /// Create a button input, assumed released at start
    pub fn new(pin: P, config: ButtonConfig) -> Self {
        Self {
            pin,
            config,
            pressed: false,
            counter: 0,
        }
    }

    /// Debounced pressed state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn sample(&mut self) -> Option<bool> {
        let level_low = self.pin.is_low().ok()?;
        Some(level_low == self.config.active_low)
    }
}

impl<P: InputPin> InputSource for ButtonInput<P> {
    fn poll(&mut self) -> Option<InputEvent> {
        // A pin read error counts as no change
        let raw = self.sample()?;

        if raw == self.pressed {
            self.counter = 0;
            return None;
        }

        self.counter = self.counter.saturating_add(1);
        if self.counter < self.config.debounce_polls.max(1) {
            return None;
        }

        self.counter = 0;
        self.pressed = raw;
        Some(if raw {
            InputEvent::Pressed
        } else {
            InputEvent::Released
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone)]
    struct FakePin {
        low: Rc<Cell<bool>>,
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low.get())
        }
    }

    fn button() -> (ButtonInput<FakePin>, Rc<Cell<bool>>) {
        let low = Rc::new(Cell::new(false));
        let pin = FakePin { low: low.clone() };
        (ButtonInput::new(pin, ButtonConfig::default()), low)
    }

    #[test]
    fn test_press_needs_debounce() {
        let (mut btn, low) = button();

        low.set(true);
        assert_eq!(btn.poll(), None);
        assert_eq!(btn.poll(), Some(InputEvent::Pressed));
        assert!(btn.is_pressed());
        assert_eq!(btn.poll(), None);

        low.set(false);
        assert_eq!(btn.poll(), None);
        assert_eq!(btn.poll(), Some(InputEvent::Released));
    }

    #[test]
    fn test_glitch_ignored() {
        let (mut btn, low) = button();

        low.set(true);
        assert_eq!(btn.poll(), None);
        low.set(false);
        assert_eq!(btn.poll(), None);
        low.set(true);
        assert_eq!(btn.poll(), None);
        assert!(!btn.is_pressed());
    }

    #[test]
    fn test_active_high() {
        let low = Rc::new(Cell::new(true));
        let pin = FakePin { low: low.clone() };
        let mut btn = ButtonInput::new(
            pin,
            ButtonConfig {
                debounce_polls: 1,
                active_low: false,
            },
        );

        assert_eq!(btn.poll(), None);
        low.set(false);
        assert_eq!(btn.poll(), Some(InputEvent::Pressed));
    }
}
