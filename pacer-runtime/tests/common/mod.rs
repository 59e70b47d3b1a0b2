#![allow(dead_code)]

use std::vec::Vec;

use embassy_time::Instant;
use pacer_core::render::CycleOutcome;
use pacer_core::traits::{DisplayError, Engine, EngineError};
use pacer_runtime::tasks::RenderObserver;

/// Engine that accumulates the time it is given
#[derive(Default)]
pub struct CountingEngine {
    pub clock_ms: u64,
    pub draws: u32,
}

impl Engine for CountingEngine {
    fn advance(&mut self, elapsed_ms: u32) {
        self.clock_ms += elapsed_ms as u64;
    }

    fn process_and_draw(&mut self) -> Result<(), EngineError> {
        self.draws += 1;
        Ok(())
    }
}

/// Engine whose every draw fails
#[derive(Default)]
pub struct FaultyEngine {
    pub draws: u32,
}

impl Engine for FaultyEngine {
    fn advance(&mut self, _elapsed_ms: u32) {}

    fn process_and_draw(&mut self) -> Result<(), EngineError> {
        self.draws += 1;
        Err(EngineError::Flush(DisplayError::Communication))
    }
}

/// Observer keeping every cycle
#[derive(Default)]
pub struct Recorder {
    pub cycles: Vec<(Instant, CycleOutcome)>,
}

impl Recorder {
    pub fn outcomes(&self) -> Vec<CycleOutcome> {
        self.cycles.iter().map(|(_, o)| *o).collect()
    }

    pub fn count(&self, pred: impl Fn(&CycleOutcome) -> bool) -> usize {
        self.cycles.iter().filter(|(_, o)| pred(o)).count()
    }
}

impl RenderObserver for Recorder {
    fn on_cycle(&mut self, started: Instant, outcome: &CycleOutcome) {
        self.cycles.push((started, *outcome));
    }
}
