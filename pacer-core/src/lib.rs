//! Board-agnostic core logic for the Pacer render scheduling firmware
//!
//! This crate contains everything that does not depend on an executor or
//! on specific hardware:
//!
//! - Collaborator traits (engine, display, input, log sink, heap stats)
//! - Tick counter shared between the tick source and the render task
//! - Engine state and per-cycle render bookkeeping
//! - Heap diagnostics sampling
//! - Cancellation token
//! - Configuration types and the embedded config parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod diagnostics;
pub mod render;
pub mod tick;
pub mod traits;

pub use cancel::CancelToken;
pub use tick::{TickConsumer, TickCounter};
