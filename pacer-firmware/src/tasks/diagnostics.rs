//! Heap diagnostics task

use defmt::*;
use pacer_runtime::tasks::run_diagnostics;

use crate::logging::HeapLog;
use crate::system::System;

#[embassy_executor::task]
pub async fn diagnostics_task(system: &'static System) {
    info!(
        "Diagnostics task started on core {} ({}ms)",
        system.config.diagnostics.core, system.config.diagnostics.period_ms
    );

    let monitor = run_diagnostics(
        &system.heap,
        &system.config.diagnostics,
        &system.cancel,
        &mut HeapLog,
    )
    .await;

    info!(
        "Diagnostics task stopped: {} samples, {} failures",
        monitor.samples(),
        monitor.failures()
    );
}
