//! Minimal TOML parser for the scheduling configuration
//!
//! Handles only the subset `pacer.toml` uses. It does NOT support the full
//! TOML spec.
//!
//! Supported features:
//! - `[tick]`, `[render]` and `[diagnostics]` section headers
//! - Key = value pairs (integer, boolean)
//! - Comments (# ...), including trailing comments
//!
//! Unknown keys are ignored; unknown sections are an error. The build
//! script validates the same file with the full `toml` crate on the host.

use super::types::{ConfigError, PacerConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key = value pair outside any section
    KeyOutsideSection,
    /// Value of the wrong type or out of range for its field
    InvalidValue,
    /// Values parsed but fail validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Tick,
    Render,
    Diagnostics,
}

/// Parse TOML text into a validated [`PacerConfig`]
///
/// Fields absent from the input keep their defaults.
pub fn parse_config(input: &str) -> Result<PacerConfig, ParseError> {
    let mut config = PacerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Remove a trailing `#` comment
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "tick" => Ok(Section::Tick),
        "render" => Ok(Section::Render),
        "diagnostics" => Ok(Section::Diagnostics),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let mut acc: u64 = 0;
    let mut digits = 0;

    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_add(d as u64))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }

    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }

    T::try_from(acc).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PacerConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::KeyOutsideSection),
        Section::Tick => match key {
            "period_ms" => config.tick.period_ms = parse_int(value)?,
            _ => {} // Ignore unknown keys
        },
        Section::Render => {
            let r = &mut config.render;
            match key {
                "period_ms" => r.period_ms = parse_int(value)?,
                "guard_timeout_ms" => r.guard_timeout_ms = parse_int(value)?,
                "restart_after_timeouts" => r.restart_after_timeouts = parse_int(value)?,
                "restart_backoff_ms" => r.restart_backoff_ms = parse_int(value)?,
                "max_batch_ms" => r.max_batch_ms = parse_int(value)?,
                "core" => r.core = parse_int(value)?,
                _ => {}
            }
        }
        Section::Diagnostics => {
            let d = &mut config.diagnostics;
            match key {
                "enabled" => d.enabled = parse_bool(value)?,
                "period_ms" => d.period_ms = parse_int(value)?,
                "core" => d.core = parse_int(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u32>("10"), Ok(10));
        assert_eq!(parse_int::<u32>("5_000"), Ok(5000));
        assert_eq!(parse_int::<u8>("256"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u32>("-1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u32>("_"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("render"), Ok(Section::Render));
        assert_eq!(parse_section_header(" tick "), Ok(Section::Tick));
        assert_eq!(
            parse_section_header("display"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Reference timing
[tick]
period_ms = 10

[render]
period_ms = 10
guard_timeout_ms = 250   # bounded wait
restart_after_timeouts = 5
restart_backoff_ms = 50
max_batch_ms = 100
core = 1

[diagnostics]
enabled = true
period_ms = 5_000
core = 0
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.tick.period_ms, 10);
        assert_eq!(config.render.guard_timeout_ms, 250);
        assert_eq!(config.render.restart_after_timeouts, 5);
        assert_eq!(config.render.restart_backoff_ms, 50);
        assert_eq!(config.render.max_batch_ms, 100);
        assert_eq!(config.diagnostics.period_ms, 5000);
        assert_eq!(config.diagnostics.core, 0);
    }

    #[test]
    fn test_missing_fields_keep_defaults() {
        let config = parse_config("[render]\nguard_timeout_ms = 0\n").unwrap();
        assert_eq!(config.render.guard_timeout(), None);
        assert_eq!(config.render.period_ms, 10);
        assert_eq!(config.tick, PacerConfig::default().tick);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = parse_config("[tick]\nperiod_ms = 20\nflavour = 3\n").unwrap();
        assert_eq!(config.tick.period_ms, 20);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_config("period_ms = 10"),
            Err(ParseError::KeyOutsideSection)
        );
        assert_eq!(
            parse_config("[diagnostics]\nenabled = yes"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[tick]\nperiod_ms = 0"),
            Err(ParseError::Invalid(ConfigError::ZeroTickPeriod))
        );
        assert_eq!(parse_config("[render]\ncore"), Err(ParseError::InvalidValue));
    }
}
