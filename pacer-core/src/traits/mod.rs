//! Collaborator traits
//!
//! These traits define the interface between the scheduling core and the
//! external pieces it binds together: the rendering engine, its display
//! and input drivers, the log sink and the allocator statistics.

pub mod display;
pub mod engine;
pub mod heap;
pub mod input;
pub mod log;

pub use display::{DisplayDriver, DisplayError};
pub use engine::{Engine, EngineError};
pub use heap::HeapStats;
pub use input::{InputEvent, InputSource};
pub use log::LogSink;
