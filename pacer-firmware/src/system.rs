//! Objects shared between tasks
//!
//! Everything here is created once in bootstrap and lives in a `StaticCell`
//! for the rest of the program. Tasks receive `&'static System`.

use embassy_rp::gpio::Input;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use pacer_core::config::PacerConfig;
use pacer_core::render::EngineState;
use pacer_core::{CancelToken, TickCounter};
use pacer_drivers::display::AnsiTerminal;
use pacer_drivers::engine::TextEngine;
use pacer_drivers::input::ButtonInput;
use pacer_runtime::Guard;

use crate::heap::AllocatorStats;
use crate::logging::DefmtLog;

/// Terminal on the display UART
pub type Display = AnsiTerminal<BufferedUartTx<'static, UART0>>;

/// User button
pub type Button = ButtonInput<Input<'static>>;

/// The engine instance driven by the render task
pub type Ui = TextEngine<Display, Button, DefmtLog>;

/// Guard over the engine and its tick bookkeeping
///
/// `CriticalSectionRawMutex` takes the RP2040 hardware spinlock, so the
/// guard holds across both cores.
pub type EngineGuard = Guard<CriticalSectionRawMutex, EngineState<Ui>>;

/// State shared by every task, initialised once in bootstrap
pub struct System {
    /// Embedded configuration, or defaults if it failed to parse
    pub config: PacerConfig,
    /// Advanced by the tick task, drained by the render task
    pub ticks: TickCounter,
    /// Never set in firmware
    pub cancel: CancelToken,
    pub engine: EngineGuard,
    pub heap: AllocatorStats,
}
