//! Render cycle bookkeeping
//!
//! [`EngineState`] is the context protected by the engine guard: the
//! engine itself plus the render side of the tick accounting.
//! [`RenderSupervisor`] turns the result of each cycle into a
//! [`CycleOutcome`] and decides when repeated guard timeouts warrant a
//! controlled restart of the render loop.

pub mod state;
pub mod supervisor;

pub use state::{EngineState, Service};
pub use supervisor::{CycleOutcome, RenderStats, RenderSupervisor, Severity};
