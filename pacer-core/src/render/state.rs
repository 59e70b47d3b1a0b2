//! Guard-protected engine state

use crate::tick::{TickConsumer, TickCounter};
use crate::traits::{Engine, EngineError};

/// Result of servicing the engine once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Service {
    /// Milliseconds handed to the engine this cycle
    pub elapsed_ms: u32,
    /// Result of the engine's processing cycle
    pub result: Result<(), EngineError>,
}

/// The engine together with its tick bookkeeping
///
/// Only ever reached through the engine guard. Created once at startup and
/// kept for the life of the program.
pub struct EngineState<E> {
    /// The rendering engine
    engine: E,
    /// Last counter value handed to the engine
    ticks: TickConsumer,
    /// Largest single `advance` the engine is given (None = unbounded)
    max_batch_ms: Option<u32>,
    /// Total milliseconds handed to the engine
    consumed_ms: u64,
    /// Number of completed service calls
    cycles: u32,
}

impl<E: Engine> EngineState<E> {
    /// Wrap `engine`, counting time from the counter's current value
    ///
    /// `max_batch_ms` of 0 delivers each delta in a single `advance`.
    pub fn new(engine: E, counter: &TickCounter, max_batch_ms: u32) -> Self {
        Self {
            engine,
            ticks: TickConsumer::attach(counter),
            max_batch_ms: if max_batch_ms == 0 {
                None
            } else {
                Some(max_batch_ms)
            },
            consumed_ms: 0,
            cycles: 0,
        }
    }

    /// Hand the accumulated tick delta to the engine and let it draw
    ///
    /// The delta is consumed even if the engine reports an error, so a
    /// failing cycle never replays time.
    pub fn service(&mut self, counter: &TickCounter) -> Service {
        let elapsed_ms = self.ticks.take_delta(counter);
        self.deliver(elapsed_ms);
        self.consumed_ms += elapsed_ms as u64;
        self.cycles = self.cycles.wrapping_add(1);

        Service {
            elapsed_ms,
            result: self.engine.process_and_draw(),
        }
    }

    fn deliver(&mut self, mut elapsed_ms: u32) {
        if let Some(max) = self.max_batch_ms {
            while elapsed_ms > max {
                self.engine.advance(max);
                elapsed_ms -= max;
            }
        }
        if elapsed_ms > 0 {
            self.engine.advance(elapsed_ms);
        }
    }

    /// Mutable access to the engine, e.g. to update UI content
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Shared access to the engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Total milliseconds handed to the engine so far
    pub fn consumed_ms(&self) -> u64 {
        self.consumed_ms
    }

    /// Milliseconds fired by the tick source but not yet consumed
    pub fn pending_ms(&self, counter: &TickCounter) -> u32 {
        self.ticks.pending(counter)
    }

    /// Number of completed service calls
    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}
