//! Tick source loop
//!
//! Advances the shared clock once per period. The ticker schedules each
//! deadline from the previous one, so a late wake-up fires the missed
//! periods back-to-back instead of dropping them.

use embassy_time::{Duration, Ticker};
use pacer_core::config::TickConfig;
use pacer_core::{CancelToken, TickCounter};

/// Advance `counter` by `config.period_ms` every period until cancelled
///
/// Never acquires the engine guard.
pub async fn run_tick_source(counter: &TickCounter, config: &TickConfig, cancel: &CancelToken) {
    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms as u64));

    while !cancel.is_cancelled() {
        ticker.next().await;
        counter.advance(config.period_ms);
    }
}
