//! Rendering engine trait

use super::display::DisplayError;

/// Errors reported by the engine's processing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// The display driver rejected a flush
    Flush(DisplayError),
    /// Input arrived faster than the engine drained it
    InputOverflow,
}

impl From<DisplayError> for EngineError {
    fn from(e: DisplayError) -> Self {
        EngineError::Flush(e)
    }
}

/// A non-reentrant, cooperative rendering engine
///
/// Every method takes `&mut self`: callers must hold the engine guard.
pub trait Engine {
    /// Advance the engine's logical clock by `elapsed_ms`
    fn advance(&mut self, elapsed_ms: u32);

    /// Process pending input and timers, then repaint dirty regions
    ///
    /// Errors are reported to the caller but the engine must stay usable:
    /// the next call retries whatever was left undone.
    fn process_and_draw(&mut self) -> Result<(), EngineError>;
}
