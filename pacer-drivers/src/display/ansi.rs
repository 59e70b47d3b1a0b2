//! ANSI terminal display
//!
//! Treats a serial terminal as a character display: every row flush moves
//! the cursor to the start of the row, writes the text and erases to the
//! end of the line.

use core::fmt::Write as _;

use embedded_io::Write;
use heapless::String;
use pacer_core::traits::{DisplayDriver, DisplayError};

use crate::engine::MAX_COLS;

/// Clear screen, cursor home, hide cursor
const INIT_SEQUENCE: &[u8] = b"\x1b[2J\x1b[H\x1b[?25l";

/// Display driver writing ANSI escape sequences to a serial link
pub struct AnsiTerminal<W> {
    link: W,
    cols: u8,
    rows: u8,
}

impl<W: Write> AnsiTerminal<W> {
    /// Create a terminal of `cols` x `rows` characters
    pub fn new(link: W, cols: u8, rows: u8) -> Self {
        Self {
            link,
            cols: cols.min(MAX_COLS as u8),
            rows,
        }
    }

    /// Clear the terminal and hide the cursor
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.link
            .write_all(INIT_SEQUENCE)
            .map_err(|_| DisplayError::Communication)?;
        self.link.flush().map_err(|_| DisplayError::Communication)
    }

    /// Underlying link
    pub fn link(&self) -> &W {
        &self.link
    }
}

impl<W: Write> DisplayDriver for AnsiTerminal<W> {
    fn flush_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        if row >= self.rows {
            return Err(DisplayError::InvalidRow);
        }

        // ESC [ row ; 1 H  (rows are 1-based)
        let mut cursor: String<12> = String::new();
        write!(cursor, "\x1b[{};1H", row as u16 + 1).map_err(|_| DisplayError::InvalidRow)?;

        let text = match text.char_indices().nth(self.cols as usize) {
            Some((idx, _)) => &text[..idx],
            None => text,
        };

        self.link
            .write_all(cursor.as_bytes())
            .and_then(|_| self.link.write_all(text.as_bytes()))
            .and_then(|_| self.link.write_all(b"\x1b[K"))
            .and_then(|_| self.link.flush())
            .map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }
}
