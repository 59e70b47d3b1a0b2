//! Render task

use defmt::*;
use pacer_runtime::tasks::run_render;

use crate::logging::RenderLog;
use crate::system::System;

#[embassy_executor::task]
pub async fn render_task(system: &'static System) {
    info!("Render task started on core {}", system.config.render.core);

    let mut observer = RenderLog::new();
    let stats = run_render(
        &system.engine,
        &system.ticks,
        &system.config.render,
        &system.cancel,
        &mut observer,
    )
    .await;

    info!("Render task stopped: {}", stats);
}
