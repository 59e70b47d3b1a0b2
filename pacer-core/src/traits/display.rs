//! Display driver trait

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or link failure
    Communication,
    /// Row outside the display
    InvalidRow,
}

/// Character-cell display driver
///
/// Registered once with the engine and only ever invoked from inside the
/// engine's draw cycle, i.e. while the engine guard is held.
pub trait DisplayDriver {
    /// Replace the contents of `row` with `text`
    ///
    /// Text shorter than the row clears the remainder of the row.
    fn flush_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError>;

    /// Display dimensions as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}
