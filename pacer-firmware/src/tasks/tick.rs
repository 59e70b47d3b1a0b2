//! Tick source task
//!
//! Runs on the high-priority interrupt executor so ticks keep their cadence
//! while the cooperative tasks are busy.

use defmt::*;
use pacer_runtime::tasks::run_tick_source;

use crate::system::System;

#[embassy_executor::task]
pub async fn tick_task(system: &'static System) {
    info!("Tick task started ({}ms)", system.config.tick.period_ms);

    run_tick_source(&system.ticks, &system.config.tick, &system.cancel).await;

    info!("Tick task stopped after {} fires", system.ticks.fires());
}
