// Configuration module for termclip
// Defaults, then ~/.config/termclip/config.toml, then TERMCLIP_* variables

mod types;

pub use types::{Config, CopyConfig, DEFAULT_OSC52_MAX_B64};

use std::fs;
use std::path::{Path, PathBuf};

use crate::environment::{self, EnvSnapshot};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warnings: Vec<String>,
}

/// Loads configuration from the config file and the environment snapshot
///
/// Never fails: unreadable or malformed input falls back to the lower
/// layer's values and records a warning.
pub fn load_config(snapshot: &EnvSnapshot) -> ConfigResult {
    let mut result = load_config_file(&get_config_path());
    apply_env_overrides(&mut result, snapshot);
    result
}

/// Loads the TOML config file at `path`
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config_file(path: &Path) -> ConfigResult {
    // If file doesn't exist, return defaults silently
    if !path.exists() {
        return ConfigResult {
            config: Config::default(),
            warnings: Vec::new(),
        };
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            return ConfigResult {
                config: Config::default(),
                warnings: vec![format!("Failed to read config: {}", e)],
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => ConfigResult {
            config,
            warnings: Vec::new(),
        },
        Err(e) => ConfigResult {
            config: Config::default(),
            warnings: vec![format!("Invalid config: {}", e)],
        },
    }
}

/// Applies `TERMCLIP_*` variables on top of the file configuration
///
/// A set flag variable wins over the file in both directions; only the
/// exact value `1` turns it on.
pub fn apply_env_overrides(result: &mut ConfigResult, snapshot: &EnvSnapshot) {
    let config = &mut result.config;

    if snapshot.is_set(environment::FORCE_OSC52) {
        config.copy.force_osc52 = snapshot.flag(environment::FORCE_OSC52);
    }
    if snapshot.is_set(environment::FORCE_NATIVE) {
        config.copy.force_native = snapshot.flag(environment::FORCE_NATIVE);
    }
    if snapshot.is_set(environment::DEBUG) {
        config.debug = snapshot.flag(environment::DEBUG);
    }

    if let Some(raw) = snapshot.var(environment::OSC52_MAX_B64) {
        match raw.trim().parse::<usize>() {
            Ok(max) => config.copy.osc52_max_b64 = max,
            Err(_) => result.warnings.push(format!(
                "Ignoring {}={:?}: not a non-negative integer (using {})",
                environment::OSC52_MAX_B64,
                raw,
                config.copy.osc52_max_b64
            )),
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/termclip/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("termclip")
        .join("config.toml")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
