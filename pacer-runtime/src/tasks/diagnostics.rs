//! Heap diagnostics loop

use embassy_time::{Duration, Ticker};
use pacer_core::config::DiagnosticsConfig;
use pacer_core::diagnostics::{FreeMemorySample, HeapMonitor};
use pacer_core::traits::HeapStats;
use pacer_core::CancelToken;

/// Receives each successful heap sample
pub trait DiagnosticsSink {
    fn report(&mut self, sample: &FreeMemorySample);
}

/// Sample `heap` every period until cancelled
///
/// Failed samples are skipped without reporting. Returns the monitor so
/// callers can inspect sample and failure counts.
pub async fn run_diagnostics<H, S>(
    heap: &H,
    config: &DiagnosticsConfig,
    cancel: &CancelToken,
    sink: &mut S,
) -> HeapMonitor
where
    H: HeapStats,
    S: DiagnosticsSink,
{
    let mut monitor = HeapMonitor::new();
    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms as u64));

    while !cancel.is_cancelled() {
        if let Some(sample) = monitor.sample(heap) {
            sink.report(&sample);
        }
        ticker.next().await;
    }

    monitor
}
