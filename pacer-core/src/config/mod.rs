//! Configuration
//!
//! Scheduling parameters for the tick source, render task and diagnostics
//! task. The firmware embeds a `pacer.toml` and parses it with the minimal
//! `no_std` parser in [`parse`].

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
