//! Engine and driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in pacer-core:
//!
//! - A small character-cell engine (screen rows, widgets, input queue)
//! - ANSI terminal display over any `embedded_io::Write` link
//! - Debounced push-button input over any `embedded_hal` input pin

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod display;
pub mod engine;
pub mod input;
