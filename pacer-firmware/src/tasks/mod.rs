//! Embassy async tasks
//!
//! Thin wrappers binding the runtime loops to the shared `System`.

pub mod diagnostics;
pub mod heartbeat;
pub mod render;
pub mod tick;

pub use diagnostics::diagnostics_task;
pub use heartbeat::heartbeat_task;
pub use render::render_task;
pub use tick::tick_task;
