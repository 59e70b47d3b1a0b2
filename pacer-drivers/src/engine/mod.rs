//! Character-cell rendering engine
//!
//! A deliberately small engine: widgets render into a row-based screen
//! buffer, changed rows are tracked as dirty and only those are flushed to
//! the display driver.

pub mod screen;
pub mod text;

pub use screen::{Screen, LINE_CAPACITY, MAX_COLS, MAX_ROWS};
pub use text::{TextEngine, Widget, INPUT_QUEUE_LEN};
