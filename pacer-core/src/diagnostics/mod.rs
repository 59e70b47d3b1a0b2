//! Heap diagnostics
//!
//! Samples the allocator directly. Nothing here touches engine state.

pub mod heap;

pub use heap::{FreeMemorySample, HeapMonitor};
