//! Logical clock shared between the tick source and the render task
//!
//! The tick source is the only writer and performs a single atomic add per
//! firing. This is the one piece of engine timing state that is touched
//! without holding the engine guard.

pub mod counter;

pub use counter::{TickConsumer, TickCounter};
