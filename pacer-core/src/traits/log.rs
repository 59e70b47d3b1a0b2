//! Text output for engine log messages

/// Destination for engine log text
///
/// The engine formats its own messages; the sink only routes finished text.
pub trait LogSink {
    /// Emit one log message
    fn write(&mut self, text: &str);
}
