//! Configuration type definitions
//!
//! Defaults reproduce the reference configuration: 10 ms ticks, a 10 ms
//! render quantum and a 5 s heap report, with render and diagnostics on
//! core 1.

/// Default tick period (ms)
pub const DEFAULT_TICK_PERIOD_MS: u32 = 10;

/// Default render sleep quantum (ms)
pub const DEFAULT_RENDER_PERIOD_MS: u32 = 10;

/// Default guard acquisition timeout (ms)
pub const DEFAULT_GUARD_TIMEOUT_MS: u32 = 100;

/// Default consecutive timeouts before a controlled restart
pub const DEFAULT_RESTART_AFTER_TIMEOUTS: u8 = 3;

/// Default pause after a controlled restart (ms)
pub const DEFAULT_RESTART_BACKOFF_MS: u32 = 100;

/// Default heap report period (ms)
pub const DEFAULT_DIAGNOSTICS_PERIOD_MS: u32 = 5000;

/// Number of cores tasks can be pinned to
pub const CORE_COUNT: u8 = 2;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `tick.period_ms` is zero
    ZeroTickPeriod,
    /// `render.period_ms` is zero
    ZeroRenderPeriod,
    /// `diagnostics.period_ms` is zero while diagnostics are enabled
    ZeroDiagnosticsPeriod,
    /// `render.max_batch_ms` is non-zero but smaller than one tick
    BatchBelowTick,
    /// Core number outside 0..CORE_COUNT
    InvalidCore(u8),
}

/// Tick source configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickConfig {
    /// Timer period and tick unit (ms)
    pub period_ms: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

/// Render task configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderConfig {
    /// Sleep quantum at the start of every cycle (ms)
    pub period_ms: u32,
    /// Guard acquisition timeout (ms), 0 = wait forever
    pub guard_timeout_ms: u32,
    /// Consecutive timeouts before a controlled restart, 0 = never restart
    pub restart_after_timeouts: u8,
    /// Pause after a controlled restart (ms)
    pub restart_backoff_ms: u32,
    /// Largest single clock advance handed to the engine (ms), 0 = unbounded
    pub max_batch_ms: u32,
    /// Core the render task runs on
    pub core: u8,
}

impl RenderConfig {
    /// Guard timeout, `None` when acquisition waits forever
    pub fn guard_timeout(&self) -> Option<u32> {
        if self.guard_timeout_ms == 0 {
            None
        } else {
            Some(self.guard_timeout_ms)
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_RENDER_PERIOD_MS,
            guard_timeout_ms: DEFAULT_GUARD_TIMEOUT_MS,
            restart_after_timeouts: DEFAULT_RESTART_AFTER_TIMEOUTS,
            restart_backoff_ms: DEFAULT_RESTART_BACKOFF_MS,
            max_batch_ms: 0,
            core: 1,
        }
    }
}

/// Diagnostics task configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiagnosticsConfig {
    /// Whether the heap report task is started
    pub enabled: bool,
    /// Report period (ms)
    pub period_ms: u32,
    /// Core the diagnostics task runs on
    pub core: u8,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period_ms: DEFAULT_DIAGNOSTICS_PERIOD_MS,
            core: 1,
        }
    }
}

/// Complete scheduling configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacerConfig {
    pub tick: TickConfig,
    pub render: RenderConfig,
    pub diagnostics: DiagnosticsConfig,
}

impl PacerConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick.period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.render.period_ms == 0 {
            return Err(ConfigError::ZeroRenderPeriod);
        }
        if self.diagnostics.enabled && self.diagnostics.period_ms == 0 {
            return Err(ConfigError::ZeroDiagnosticsPeriod);
        }
        if self.render.max_batch_ms != 0 && self.render.max_batch_ms < self.tick.period_ms {
            return Err(ConfigError::BatchBelowTick);
        }
        for core in [self.render.core, self.diagnostics.core] {
            if core >= CORE_COUNT {
                return Err(ConfigError::InvalidCore(core));
            }
        }
        Ok(())
    }
}
