//! Screen buffer with dirty-row tracking

use heapless::String;

/// Maximum rows in the screen buffer
pub const MAX_ROWS: usize = 16;

/// Maximum characters per row
pub const MAX_COLS: usize = 40;

/// Bytes per row buffer, enough for `MAX_COLS` characters of any width
pub const LINE_CAPACITY: usize = MAX_COLS * 4;

/// A text screen that remembers which rows changed since the last flush
pub struct Screen {
    /// Lines of text
    lines: [String<LINE_CAPACITY>; MAX_ROWS],
    /// Rows in use (clamped to MAX_ROWS)
    rows: u8,
    /// Columns in use (clamped to MAX_COLS)
    cols: u8,
    /// Bit n set = row n differs from what the display shows
    dirty: u16,
}

impl Screen {
    /// Create a blank screen; every row starts dirty so the first flush
    /// clears whatever the display showed at power-up
    pub fn new(cols: u8, rows: u8) -> Self {
        let rows = rows.min(MAX_ROWS as u8);
        Self {
            lines: Default::default(),
            rows,
            cols: cols.min(MAX_COLS as u8),
            dirty: Self::all_rows(rows),
        }
    }

    fn all_rows(rows: u8) -> u16 {
        if rows as usize >= u16::BITS as usize {
            u16::MAX
        } else {
            (1u16 << rows) - 1
        }
    }

    /// Set text at a specific row, marking it dirty if it changed
    ///
    /// Text longer than the screen width is truncated.
    pub fn set_line(&mut self, row: u8, text: &str) {
        if row >= self.rows {
            return;
        }
        let text = truncate(text, self.cols as usize, LINE_CAPACITY);
        let line = &mut self.lines[row as usize];
        if line.as_str() != text {
            line.clear();
            for c in text.chars() {
                if line.push(c).is_err() {
                    break;
                }
            }
            self.dirty |= 1 << row;
        }
    }

    /// Blank every row
    pub fn clear(&mut self) {
        for row in 0..self.rows {
            self.set_line(row, "");
        }
    }

    /// Get a line of text
    pub fn get_line(&self, row: u8) -> &str {
        if row < self.rows {
            self.lines[row as usize].as_str()
        } else {
            ""
        }
    }

    /// Check if a row needs flushing
    pub fn is_dirty(&self, row: u8) -> bool {
        row < self.rows && self.dirty & (1 << row) != 0
    }

    /// Number of dirty rows
    pub fn dirty_count(&self) -> u32 {
        self.dirty.count_ones()
    }

    /// Mark a row as flushed
    pub fn mark_clean(&mut self, row: u8) {
        if row < self.rows {
            self.dirty &= !(1 << row);
        }
    }

    /// Rows in use
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Columns in use
    pub fn cols(&self) -> u8 {
        self.cols
    }
}

/// Longest prefix of at most `max_chars` characters and `max_bytes` bytes
fn truncate(text: &str, max_chars: usize, max_bytes: usize) -> &str {
    let mut end = 0;
    for (chars, (idx, c)) in text.char_indices().enumerate() {
        if chars == max_chars || idx + c.len_utf8() > max_bytes {
            return &text[..end];
        }
        end = idx + c.len_utf8();
    }
    text
}
