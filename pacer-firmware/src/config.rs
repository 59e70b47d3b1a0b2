//! Embedded configuration loading

use defmt::*;
use pacer_core::config::{parse_config, PacerConfig};

/// Embedded configuration (compiled into firmware)
/// Edit pacer.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../pacer.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load() -> PacerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: tick {}ms, render {}ms on core {}, guard timeout {}ms",
                config.tick.period_ms,
                config.render.period_ms,
                config.render.core,
                config.render.guard_timeout_ms
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            PacerConfig::default()
        }
    }
}
