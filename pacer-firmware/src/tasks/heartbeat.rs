//! Main heartbeat
//!
//! Periodically writes the tick count to the status row. The engine is
//! only reachable through the guard, so this goes through it like any other
//! client and gives up on a timeout rather than stalling core 0.

use defmt::*;
use embassy_time::{Duration, Timer};

use crate::system::System;
use crate::ui;

const HEARTBEAT_PERIOD: Duration = Duration::from_secs(10);

#[embassy_executor::task]
pub async fn heartbeat_task(system: &'static System) {
    let timeout = system
        .config
        .render
        .guard_timeout()
        .map(|ms| Duration::from_millis(ms as u64));

    while !system.cancel.is_cancelled() {
        Timer::after(HEARTBEAT_PERIOD).await;

        let fires = system.ticks.fires();
        let status = ui::status(fires);
        match system
            .engine
            .with(timeout, |state| state.engine_mut().add_widget(status))
            .await
        {
            Ok(()) => trace!("Main loop heartbeat, {} tick fires", fires),
            Err(e) => warn!("Heartbeat could not update status: {}", e),
        }
    }
}
