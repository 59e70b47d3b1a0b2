//! Long-lived scheduling loops
//!
//! Each loop owns and resolves its own failures; nothing propagates from
//! one loop to another.

pub mod diagnostics;
pub mod render;
pub mod tick;

pub use diagnostics::{run_diagnostics, DiagnosticsSink};
pub use render::{run_render, RenderObserver};
pub use tick::run_tick_source;
