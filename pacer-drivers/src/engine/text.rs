//! Widget-based text engine

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use heapless::Deque;
use pacer_core::traits::{
    DisplayDriver, Engine, EngineError, InputEvent, InputSource, LogSink,
};

use super::screen::{Screen, LINE_CAPACITY};

/// Capacity of the pending-input queue
pub const INPUT_QUEUE_LEN: usize = 8;

/// Spinner animation frames
const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Something drawn on one screen row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Static text
    Label { row: u8, text: String },
    /// Text followed by a spinner advancing every `frame_ms`
    Spinner { row: u8, text: String, frame_ms: u32 },
    /// Elapsed logical time as `mm:ss`
    Uptime { row: u8 },
    /// Number of presses seen on the input device
    Presses { row: u8 },
}

impl Widget {
    fn row(&self) -> u8 {
        match self {
            Widget::Label { row, .. }
            | Widget::Spinner { row, .. }
            | Widget::Uptime { row }
            | Widget::Presses { row } => *row,
        }
    }
}

/// Engine driving a character display
///
/// The display driver, input source and log sink are handed over once at
/// construction and are only used from `process_and_draw`.
pub struct TextEngine<D, I, L> {
    display: D,
    input: I,
    log: L,
    screen: Screen,
    widgets: Vec<Widget>,
    /// Events read from the input source, not yet handled
    pending: Deque<InputEvent, INPUT_QUEUE_LEN>,
    /// Logical clock (ms)
    clock_ms: u64,
    presses: u32,
    /// Row flushes that failed and were retried later
    flush_failures: u32,
}

impl<D: DisplayDriver, I: InputSource, L: LogSink> TextEngine<D, I, L> {
    /// Create an engine sized to the display
    pub fn new(display: D, input: I, log: L) -> Self {
        let (cols, rows) = display.dimensions();
        Self {
            display,
            input,
            log,
            screen: Screen::new(cols, rows),
            widgets: Vec::new(),
            pending: Deque::new(),
            clock_ms: 0,
            presses: 0,
            flush_failures: 0,
        }
    }

    /// Add a widget, replacing any widget on the same row
    pub fn add_widget(&mut self, widget: Widget) {
        let row = widget.row();
        self.widgets.retain(|w| w.row() != row);
        self.widgets.push(widget);
    }

    /// Remove every widget and blank the screen
    pub fn clear_widgets(&mut self) {
        self.widgets.clear();
        self.screen.clear();
    }

    /// Queue an input event from outside the input source
    ///
    /// Returns the event back if the queue is full.
    pub fn push_input(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.pending.push_back(event)
    }

    /// Logical clock in milliseconds
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Presses handled so far
    pub fn presses(&self) -> u32 {
        self.presses
    }

    /// Screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Row flushes that failed so far
    pub fn flush_failures(&self) -> u32 {
        self.flush_failures
    }

    /// Display driver
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable display driver
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Move events from the input source into the pending queue
    ///
    /// Returns false if an event had to be dropped.
    fn read_input(&mut self) -> bool {
        while let Some(event) = self.input.poll() {
            if self.pending.push_back(event).is_err() {
                return false;
            }
        }
        true
    }

    fn handle_input(&mut self) {
        while let Some(event) = self.pending.pop_front() {
            if event == InputEvent::Pressed {
                self.presses = self.presses.wrapping_add(1);
            }
        }
    }

    fn render_widgets(&mut self) {
        let cols = self.screen.cols() as usize;
        for widget in &self.widgets {
            let mut line = RowText::new(cols);
            let written = match widget {
                Widget::Label { text, .. } => line.write_str(text),
                Widget::Spinner { text, frame_ms, .. } => {
                    let frame = (self.clock_ms / (*frame_ms).max(1) as u64) as usize
                        % SPINNER_FRAMES.len();
                    write!(line, "{} {}", text, SPINNER_FRAMES[frame])
                }
                Widget::Uptime { .. } => {
                    let secs = self.clock_ms / 1000;
                    write!(line, "Up {:02}:{:02}", secs / 60, secs % 60)
                }
                Widget::Presses { .. } => write!(line, "Presses {}", self.presses),
            };
            if written.is_ok() {
                self.screen.set_line(widget.row(), line.as_str());
            }
        }
    }

    /// Flush dirty rows, stopping at the first driver error
    ///
    /// Rows that were not flushed stay dirty and are retried next cycle.
    fn flush(&mut self) -> Result<(), EngineError> {
        for row in 0..self.screen.rows() {
            if !self.screen.is_dirty(row) {
                continue;
            }
            if let Err(e) = self.display.flush_row(row, self.screen.get_line(row)) {
                self.flush_failures = self.flush_failures.saturating_add(1);
                let mut msg = RowText::new(LINE_CAPACITY);
                if write!(msg, "flush of row {} failed", row).is_ok() {
                    self.log.write(msg.as_str());
                }
                return Err(EngineError::Flush(e));
            }
            self.screen.mark_clean(row);
        }
        Ok(())
    }
}

/// Row text clipped to a number of characters
///
/// Output past the limit is dropped, so writing never fails.
struct RowText {
    line: heapless::String<LINE_CAPACITY>,
    cols: usize,
    chars: usize,
}

impl RowText {
    fn new(cols: usize) -> Self {
        Self {
            line: heapless::String::new(),
            cols,
            chars: 0,
        }
    }

    fn as_str(&self) -> &str {
        self.line.as_str()
    }
}

impl Write for RowText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.chars == self.cols || self.line.push(c).is_err() {
                break;
            }
            self.chars += 1;
        }
        Ok(())
    }
}

impl<D: DisplayDriver, I: InputSource, L: LogSink> Engine for TextEngine<D, I, L> {
    fn advance(&mut self, elapsed_ms: u32) {
        self.clock_ms += elapsed_ms as u64;
    }

    fn process_and_draw(&mut self) -> Result<(), EngineError> {
        let input_ok = self.read_input();
        if !input_ok {
            self.log.write("input queue full, event dropped");
        }
        self.handle_input();
        self.render_widgets();
        self.flush()?;

        if input_ok {
            Ok(())
        } else {
            Err(EngineError::InputOverflow)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacer_core::traits::DisplayError;

    #[derive(Default)]
    struct FakeDisplay {
        flushed: Vec<(u8, String)>,
        fail: bool,
    }

    impl DisplayDriver for FakeDisplay {
        fn flush_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.flushed.push((row, text.to_string()));
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (21, 4)
        }
    }

    #[derive(Default)]
    struct FakeInput {
        events: Vec<InputEvent>,
    }

    impl InputSource for FakeInput {
        fn poll(&mut self) -> Option<InputEvent> {
            if self.events.is_empty() {
                None
            } else {
                Some(self.events.remove(0))
            }
        }
    }

    #[derive(Default)]
    struct FakeLog {
        lines: Vec<String>,
    }

    impl LogSink for &mut FakeLog {
        fn write(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }
    }

    fn label(row: u8, text: &str) -> Widget {
        Widget::Label {
            row,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_first_draw_flushes_every_row() {
        let mut log = FakeLog::default();
        let mut engine = TextEngine::new(FakeDisplay::default(), FakeInput::default(), &mut log);
        engine.add_widget(label(1, "PACER"));

        assert_eq!(engine.process_and_draw(), Ok(()));

        let flushed = &engine.display().flushed;
        assert_eq!(flushed.len(), 4);
        assert_eq!(flushed[1], (1, "PACER".to_string()));
        assert_eq!(flushed[0], (0, String::new()));
    }

    #[test]
    fn test_only_changed_rows_flushed() {
        let mut log = FakeLog::default();
        let mut engine = TextEngine::new(FakeDisplay::default(), FakeInput::default(), &mut log);
        engine.add_widget(label(0, "static"));
        engine.add_widget(Widget::Uptime { row: 2 });
        engine.process_and_draw().unwrap();
        engine.display_mut().flushed.clear();

        // Same second: nothing changes
        engine.advance(500);
        engine.process_and_draw().unwrap();
        assert!(engine.display().flushed.is_empty());

        engine.advance(61_000);
        engine.process_and_draw().unwrap();
        assert_eq!(engine.display().flushed, [(2, "Up 01:01".to_string())]);
    }

    #[test]
    fn test_spinner_follows_clock() {
        let mut log = FakeLog::default();
        let mut engine = TextEngine::new(FakeDisplay::default(), FakeInput::default(), &mut log);
        engine.add_widget(Widget::Spinner {
            row: 3,
            text: "Busy".to_string(),
            frame_ms: 100,
        });

        engine.process_and_draw().unwrap();
        assert_eq!(engine.screen().get_line(3), "Busy |");

        engine.advance(250);
        engine.process_and_draw().unwrap();
        assert_eq!(engine.screen().get_line(3), "Busy -");
    }

    #[test]
    fn test_input_events_counted() {
        let mut log = FakeLog::default();
        let input = FakeInput {
            events: std::vec![InputEvent::Pressed, InputEvent::Released, InputEvent::Pressed],
        };
        let mut engine = TextEngine::new(FakeDisplay::default(), input, &mut log);
        engine.add_widget(Widget::Presses { row: 0 });

        engine.process_and_draw().unwrap();
        assert_eq!(engine.presses(), 2);
        assert_eq!(engine.screen().get_line(0), "Presses 2");
    }

    #[test]
    fn test_input_overflow_reported_and_logged() {
        let mut log = FakeLog::default();
        let input = FakeInput {
            events: std::vec![InputEvent::Pressed; INPUT_QUEUE_LEN + 2],
        };
        let mut engine = TextEngine::new(FakeDisplay::default(), input, &mut log);

        assert_eq!(engine.process_and_draw(), Err(EngineError::InputOverflow));
        assert_eq!(engine.presses(), INPUT_QUEUE_LEN as u32);

        // Leftover event is picked up next cycle
        assert_eq!(engine.process_and_draw(), Ok(()));
        assert_eq!(engine.presses(), INPUT_QUEUE_LEN as u32 + 1);

        drop(engine);
        assert_eq!(log.lines, ["input queue full, event dropped"]);
    }

    #[test]
    fn test_flush_failure_keeps_rows_dirty() {
        let mut log = FakeLog::default();
        let display = FakeDisplay {
            fail: true,
            ..Default::default()
        };
        let mut engine = TextEngine::new(display, FakeInput::default(), &mut log);

        assert_eq!(
            engine.process_and_draw(),
            Err(EngineError::Flush(DisplayError::Communication))
        );
        assert_eq!(engine.screen().dirty_count(), 4);
        assert_eq!(engine.flush_failures(), 1);

        engine.display_mut().fail = false;
        assert_eq!(engine.process_and_draw(), Ok(()));
        assert_eq!(engine.screen().dirty_count(), 0);

        drop(engine);
        assert_eq!(log.lines, ["flush of row 0 failed"]);
    }

    #[test]
    fn test_widget_replaces_same_row() {
        let mut log = FakeLog::default();
        let mut engine = TextEngine::new(FakeDisplay::default(), FakeInput::default(), &mut log);
        engine.add_widget(label(1, "old"));
        engine.add_widget(label(1, "new"));

        engine.process_and_draw().unwrap();
        assert_eq!(engine.screen().get_line(1), "new");
    }

    #[test]
    fn test_long_label_clipped_to_width() {
        let mut log = FakeLog::default();
        let mut engine = TextEngine::new(FakeDisplay::default(), FakeInput::default(), &mut log);
        engine.add_widget(label(0, &"X".repeat(70)));

        engine.process_and_draw().unwrap();
        assert_eq!(engine.screen().get_line(0), "X".repeat(21));
        assert_eq!(engine.display().flushed[0], (0, "X".repeat(21)));
    }

    #[test]
    fn test_long_spinner_clipped_to_width() {
        let mut log = FakeLog::default();
        let mut engine = TextEngine::new(FakeDisplay::default(), FakeInput::default(), &mut log);
        engine.add_widget(Widget::Spinner {
            row: 0,
            text: "é".repeat(40),
            frame_ms: 100,
        });

        engine.process_and_draw().unwrap();
        assert_eq!(engine.screen().get_line(0), "é".repeat(21));
    }

    #[test]
    fn test_row_text_stops_at_limit() {
        let mut line = RowText::new(5);
        write!(line, "Up {:02}:{:02}", 1, 2).unwrap();
        assert_eq!(line.as_str(), "Up 01");
    }
}
