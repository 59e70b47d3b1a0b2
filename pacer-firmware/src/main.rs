//! Pacer - Render Scheduling Firmware
//!
//! Drives a cooperative, non-reentrant rendering engine on an RP2040:
//!
//! - Core 0, interrupt executor (SWI_IRQ_1, P2): tick source
//! - Core 0, thread executor: heartbeat
//! - Configurable core (default 1): render task and heap diagnostics
//!
//! The engine is only reachable through a guard. The tick source never
//! takes it; it advances an atomic counter the render task drains.

#![no_std]
#![no_main]

extern crate alloc;

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor, SendSpawner, SpawnError, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use pacer_core::render::EngineState;
use pacer_core::traits::DisplayError;
use pacer_core::{CancelToken, TickCounter};
use pacer_drivers::display::AnsiTerminal;
use pacer_drivers::engine::TextEngine;
use pacer_drivers::input::{ButtonConfig, ButtonInput};
use pacer_runtime::Guard;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::heap::AllocatorStats;
use crate::logging::DefmtLog;
use crate::system::System;

mod config;
mod heap;
mod logging;
mod system;
mod tasks;
mod ui;

/// Terminal geometry of the attached display
const DISPLAY_COLS: u8 = 32;
const DISPLAY_ROWS: u8 = 8;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

static SYSTEM: StaticCell<System> = StaticCell::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_CORE0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR_CORE1: StaticCell<Executor> = StaticCell::new();
static mut CORE1_STACK: Stack<8192> = Stack::new();

/// Startup failures; each one aborts the boot
#[derive(Format)]
enum BootError {
    Display(DisplayError),
    Spawn {
        task: &'static str,
        error: SpawnError,
    },
}

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Pacer firmware starting...");

    // Heap first: the engine's widget list allocates
    heap::init();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Display on UART0 (TX=GPIO0, RX=GPIO1)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();

    let mut display = AnsiTerminal::new(tx, DISPLAY_COLS, DISPLAY_ROWS);
    if let Err(e) = display.init() {
        abort(BootError::Display(e));
    }
    info!("Display initialized ({}x{})", DISPLAY_COLS, DISPLAY_ROWS);

    // User button on GPIO15, pressed pulls low
    let button = ButtonInput::new(Input::new(p.PIN_15, Pull::Up), ButtonConfig::default());

    let mut engine = TextEngine::new(display, button, DefmtLog);
    ui::install(&mut engine);

    let ticks = TickCounter::new();
    let state = EngineState::new(engine, &ticks, config.render.max_batch_ms);

    let system: &'static System = SYSTEM.init(System {
        config,
        ticks,
        cancel: CancelToken::new(),
        engine: Guard::new(state),
        heap: AllocatorStats,
    });
    info!("Engine ready");

    // Tick source preempts everything else on core 0
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high: SendSpawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    check_spawn("tick", high.spawn(tasks::tick_task(system)));

    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor = EXECUTOR_CORE1.init(Executor::new());
            executor.run(|spawner| launch(spawner, 1, system))
        },
    );

    let executor = EXECUTOR_CORE0.init(Executor::new());
    executor.run(|spawner| {
        launch(spawner, 0, system);
        check_spawn("heartbeat", spawner.spawn(tasks::heartbeat_task(system)));
        info!("All tasks spawned, firmware running");
    })
}

/// Spawn the tasks configured for `core`
fn launch(spawner: Spawner, core: u8, system: &'static System) {
    if system.config.render.core == core {
        check_spawn("render", spawner.spawn(tasks::render_task(system)));
    }

    let diagnostics = &system.config.diagnostics;
    if diagnostics.enabled && diagnostics.core == core {
        check_spawn("diagnostics", spawner.spawn(tasks::diagnostics_task(system)));
    }
}

fn check_spawn(task: &'static str, result: Result<(), SpawnError>) {
    if let Err(error) = result {
        abort(BootError::Spawn { task, error });
    }
}

fn abort(error: BootError) -> ! {
    defmt::panic!("Startup aborted: {}", error)
}
