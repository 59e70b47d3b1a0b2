//! Render loop
//!
//! One cycle: sleep a quantum, acquire the guard, let the engine consume
//! the tick delta and draw, release the guard, report the outcome. The
//! guard token is dropped before the outcome is reported and before any
//! further suspension point.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant, Timer};
use pacer_core::config::RenderConfig;
use pacer_core::render::{CycleOutcome, EngineState, RenderStats, RenderSupervisor};
use pacer_core::traits::Engine;
use pacer_core::{CancelToken, TickCounter};

use crate::guard::Guard;

/// Receives the outcome of every render cycle
pub trait RenderObserver {
    /// Called after the guard was released
    ///
    /// `started` is the instant the cycle began, before its sleep.
    fn on_cycle(&mut self, started: Instant, outcome: &CycleOutcome);
}

impl RenderObserver for () {
    fn on_cycle(&mut self, _started: Instant, _outcome: &CycleOutcome) {}
}

/// Drive the engine until cancelled, returning the final totals
pub async fn run_render<M, E, O>(
    guard: &Guard<M, EngineState<E>>,
    counter: &TickCounter,
    config: &RenderConfig,
    cancel: &CancelToken,
    observer: &mut O,
) -> RenderStats
where
    M: RawMutex,
    E: Engine,
    O: RenderObserver,
{
    let quantum = Duration::from_millis(config.period_ms as u64);
    let timeout = config
        .guard_timeout()
        .map(|ms| Duration::from_millis(ms as u64));
    let backoff = Duration::from_millis(config.restart_backoff_ms as u64);

    let mut supervisor = RenderSupervisor::new(config.restart_after_timeouts);

    while !cancel.is_cancelled() {
        let started = Instant::now();
        Timer::after(quantum).await;

        let outcome = match guard.acquire_within(timeout).await {
            Ok(mut state) => {
                let service = state.service(counter);
                drop(state);
                supervisor.on_serviced(service)
            }
            Err(_) => supervisor.on_timeout(),
        };

        observer.on_cycle(started, &outcome);

        if let CycleOutcome::Restart { .. } = outcome {
            Timer::after(backoff).await;
        }
    }

    supervisor.stats()
}
