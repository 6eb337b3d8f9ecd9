// Configuration type definitions

use serde::Deserialize;

/// Default cap on the base64 length of an OSC 52 payload
pub const DEFAULT_OSC52_MAX_B64: usize = 75_000;

/// Copy behaviour section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CopyConfig {
    /// Skip the multiplexer and native candidates, go straight to OSC 52
    #[serde(default)]
    pub force_osc52: bool,
    /// Never fall back to OSC 52
    #[serde(default)]
    pub force_native: bool,
    #[serde(default = "default_osc52_max_b64")]
    pub osc52_max_b64: usize,
}

fn default_osc52_max_b64() -> usize {
    DEFAULT_OSC52_MAX_B64
}

impl Default for CopyConfig {
    fn default() -> Self {
        CopyConfig {
            force_osc52: false,
            force_native: false,
            osc52_max_b64: DEFAULT_OSC52_MAX_B64,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    /// Trace every transport step to stderr
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub copy: CopyConfig,
}


#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
