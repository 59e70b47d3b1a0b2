//! Async scheduling loops for Pacer
//!
//! Executor-agnostic building blocks the firmware wraps in embassy tasks:
//!
//! - [`Guard`]: the mutual-exclusion guard over engine state
//! - [`tasks::run_tick_source`]: periodic clock advance, never takes the guard
//! - [`tasks::run_render`]: sleep, acquire, service, release
//! - [`tasks::run_diagnostics`]: periodic free-heap report
//!
//! Every loop stops at the top of its next cycle once the shared
//! [`CancelToken`](pacer_core::CancelToken) is set.

#![no_std]
#![deny(unsafe_code)]

pub mod guard;
pub mod tasks;

pub use guard::{Guard, GuardError, Held};
