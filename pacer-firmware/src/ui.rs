//! Screen content installed at startup

use alloc::string::String;
use core::fmt::Write;

use pacer_drivers::engine::Widget;

use crate::system::Ui;

/// Row updated by the heartbeat task
pub const STATUS_ROW: u8 = 7;

pub fn install(ui: &mut Ui) {
    ui.add_widget(Widget::Label {
        row: 0,
        text: String::from("PACER"),
    });
    ui.add_widget(Widget::Spinner {
        row: 2,
        text: String::from("Rendering"),
        frame_ms: 250,
    });
    ui.add_widget(Widget::Uptime { row: 4 });
    ui.add_widget(Widget::Presses { row: 5 });
    ui.add_widget(status(0));
}

/// Status line showing the tick count seen by the heartbeat
pub fn status(fires: u32) -> Widget {
    let mut text = String::new();
    let _ = write!(text, "Ticks {}", fires);
    Widget::Label {
        row: STATUS_ROW,
        text,
    }
}
