//! Per-cycle outcome tracking and restart policy

use crate::render::state::Service;
use crate::traits::EngineError;

/// What happened in one render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Engine advanced and drew successfully
    Rendered { elapsed_ms: u32 },
    /// Engine advanced but its processing cycle reported an error
    EngineFault { elapsed_ms: u32, error: EngineError },
    /// Guard not acquired in time; cycle skipped
    Skipped { consecutive: u8 },
    /// Too many consecutive timeouts; render loop restarts
    Restart { timeouts: u8 },
}

/// Log level an outcome is reported at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    /// Normal cycle, not logged
    Quiet,
    /// Engine-internal error, already reported through the engine's log sink
    Debug,
    /// Transient failure the loop recovers from on its own
    Warning,
    /// Controlled restart
    Error,
}

impl CycleOutcome {
    pub fn severity(&self) -> Severity {
        match self {
            CycleOutcome::Rendered { .. } => Severity::Quiet,
            CycleOutcome::EngineFault { .. } => Severity::Debug,
            CycleOutcome::Skipped { .. } => Severity::Warning,
            CycleOutcome::Restart { .. } => Severity::Error,
        }
    }
}

/// Running totals over all render cycles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderStats {
    /// Cycles where the engine drew without error
    pub rendered: u32,
    /// Cycles where the engine reported an error
    pub faults: u32,
    /// Cycles skipped on guard timeout (restarts included)
    pub skipped: u32,
    /// Controlled restarts
    pub restarts: u32,
    /// Milliseconds handed to the engine
    pub consumed_ms: u64,
}

/// Classifies cycles and applies the restart policy
#[derive(Debug, Clone)]
pub struct RenderSupervisor {
    /// Consecutive timeouts that trigger a restart (0 = never)
    restart_after: u8,
    /// Current timeout streak
    consecutive_timeouts: u8,
    stats: RenderStats,
}

impl RenderSupervisor {
    /// Create a supervisor restarting after `restart_after` consecutive timeouts
    pub const fn new(restart_after: u8) -> Self {
        Self {
            restart_after,
            consecutive_timeouts: 0,
            stats: RenderStats {
                rendered: 0,
                faults: 0,
                skipped: 0,
                restarts: 0,
                consumed_ms: 0,
            },
        }
    }

    /// Record a cycle that held the guard and serviced the engine
    pub fn on_serviced(&mut self, service: Service) -> CycleOutcome {
        self.consecutive_timeouts = 0;
        self.stats.consumed_ms += service.elapsed_ms as u64;

        match service.result {
            Ok(()) => {
                self.stats.rendered += 1;
                CycleOutcome::Rendered {
                    elapsed_ms: service.elapsed_ms,
                }
            }
            Err(error) => {
                self.stats.faults += 1;
                CycleOutcome::EngineFault {
                    elapsed_ms: service.elapsed_ms,
                    error,
                }
            }
        }
    }

    /// Record a cycle whose guard acquisition timed out
    pub fn on_timeout(&mut self) -> CycleOutcome {
        self.consecutive_timeouts = self.consecutive_timeouts.saturating_add(1);
        self.stats.skipped += 1;

        if self.restart_after > 0 && self.consecutive_timeouts >= self.restart_after {
            let timeouts = self.consecutive_timeouts;
            self.consecutive_timeouts = 0;
            self.stats.restarts += 1;
            CycleOutcome::Restart { timeouts }
        } else {
            CycleOutcome::Skipped {
                consecutive: self.consecutive_timeouts,
            }
        }
    }

    /// Current timeout streak
    pub fn consecutive_timeouts(&self) -> u8 {
        self.consecutive_timeouts
    }

    /// Totals so far
    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}
