//! Build script for pacer-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pacer.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the runtime parser accepts
const SECTIONS: [&str; 3] = ["tick", "render", "diagnostics"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate pacer.toml at compile time
///
/// Mirrors the checks of `PacerConfig::validate` so a bad file fails the
/// build instead of silently falling back to defaults on the board.
fn validate_config() {
    println!("cargo:rerun-if-changed=pacer.toml");

    let config_path = Path::new("pacer.toml");

    if !config_path.exists() {
        fail(
            "pacer.toml not found!",
            &[
                "The firmware embeds pacer.toml at build time.".to_string(),
                "Create one in the pacer-firmware directory.".to_string(),
            ],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read pacer.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in pacer.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_tick(&config, &mut errors);
    validate_render(&config, &mut errors);
    validate_diagnostics(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in pacer.toml", &errors);
    }

    println!("cargo:warning=pacer.toml validated successfully");
}

/// Reject top-level keys and unknown sections
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (name, value) in table {
        if !value.is_table() {
            errors.push(format!("'{}' must be inside a section", name));
        } else if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        }
    }
}

fn validate_tick(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(period) = integer(config, "tick", "period_ms", errors) {
        check_range(errors, "tick", "period_ms", period, 1, u32::MAX as i64);
    }
}

fn validate_render(config: &toml::Value, errors: &mut Vec<String>) {
    let max = u32::MAX as i64;

    if let Some(period) = integer(config, "render", "period_ms", errors) {
        check_range(errors, "render", "period_ms", period, 1, max);
    }
    if let Some(timeout) = integer(config, "render", "guard_timeout_ms", errors) {
        check_range(errors, "render", "guard_timeout_ms", timeout, 0, max);
    }
    if let Some(limit) = integer(config, "render", "restart_after_timeouts", errors) {
        check_range(errors, "render", "restart_after_timeouts", limit, 0, u8::MAX as i64);
    }
    if let Some(backoff) = integer(config, "render", "restart_backoff_ms", errors) {
        check_range(errors, "render", "restart_backoff_ms", backoff, 0, max);
    }
    if let Some(core) = integer(config, "render", "core", errors) {
        check_range(errors, "render", "core", core, 0, 1);
    }

    if let Some(batch) = integer(config, "render", "max_batch_ms", errors) {
        check_range(errors, "render", "max_batch_ms", batch, 0, max);

        let tick = integer(config, "tick", "period_ms", &mut Vec::new()).unwrap_or(10);
        if batch != 0 && batch < tick {
            errors.push(format!(
                "[render] max_batch_ms ({}) must be 0 or at least tick.period_ms ({})",
                batch, tick
            ));
        }
    }
}

fn validate_diagnostics(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("diagnostics").and_then(|d| d.get("enabled")) {
        None | Some(toml::Value::Boolean(_)) => {}
        Some(_) => errors.push("[diagnostics] enabled must be true or false".to_string()),
    }

    if let Some(period) = integer(config, "diagnostics", "period_ms", errors) {
        check_range(errors, "diagnostics", "period_ms", period, 1, u32::MAX as i64);
    }
    if let Some(core) = integer(config, "diagnostics", "core", errors) {
        check_range(errors, "diagnostics", "core", core, 0, 1);
    }
}

/// Integer value of `[section] key`, if present
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        None => None,
        Some(toml::Value::Integer(value)) => Some(*value),
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn check_range(errors: &mut Vec<String>, section: &str, key: &str, value: i64, min: i64, max: i64) {
    if value < min || value > max {
        errors.push(format!(
            "[{}] {} must be {}-{}, got {}",
            section, key, min, max, value
        ));
    }
}

/// Abort the build with a boxed diagnostic
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
