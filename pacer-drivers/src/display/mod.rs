//! Display drivers

pub mod ansi;

pub use ansi::AnsiTerminal;
