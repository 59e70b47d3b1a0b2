//! defmt adapters for the library sinks and observers

use defmt::*;
use embassy_time::Instant;
use pacer_core::diagnostics::FreeMemorySample;
use pacer_core::render::{CycleOutcome, Severity};
use pacer_core::traits::LogSink;
use pacer_runtime::tasks::{DiagnosticsSink, RenderObserver};

/// Cycles between render summaries at debug level
const SUMMARY_EVERY: u32 = 1000;

/// Engine log sink forwarding to RTT
pub struct DefmtLog;

impl LogSink for DefmtLog {
    fn write(&mut self, text: &str) {
        info!("[engine] {=str}", text);
    }
}

/// Logs guard timeouts, restarts and engine faults of the render task
pub struct RenderLog {
    cycles: u32,
    worst_cycle_ms: u64,
}

impl RenderLog {
    pub const fn new() -> Self {
        Self {
            cycles: 0,
            worst_cycle_ms: 0,
        }
    }
}

impl RenderObserver for RenderLog {
    fn on_cycle(&mut self, started: Instant, outcome: &CycleOutcome) {
        let cycle_ms = started.elapsed().as_millis();
        self.worst_cycle_ms = self.worst_cycle_ms.max(cycle_ms);
        self.cycles = self.cycles.wrapping_add(1);

        match outcome.severity() {
            Severity::Quiet => {}
            Severity::Debug => debug!("Render: {}", outcome),
            Severity::Warning => warn!("Render: guard timeout, cycle skipped: {}", outcome),
            Severity::Error => error!("Render: too many guard timeouts, restarting: {}", outcome),
        }

        if self.cycles % SUMMARY_EVERY == 0 {
            debug!(
                "Render: {} cycles, slowest {}ms",
                self.cycles, self.worst_cycle_ms
            );
            self.worst_cycle_ms = 0;
        }
    }
}

/// Prints heap samples
pub struct HeapLog;

impl DiagnosticsSink for HeapLog {
    fn report(&mut self, sample: &FreeMemorySample) {
        info!(
            "Free heap size: {} Kb (low water {} Kb)",
            sample.free_kb(),
            sample.low_water_kb()
        );
    }
}
