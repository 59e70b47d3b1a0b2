//! Input driver trait

/// Pointer-style input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Pointer pressed
    Pressed,
    /// Pointer released
    Released,
}

/// Source of input events, polled from the engine's processing cycle
pub trait InputSource {
    /// Return the next pending event, if any
    fn poll(&mut self) -> Option<InputEvent>;
}
