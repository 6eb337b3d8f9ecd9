//! Environment snapshot
//!
//! Every environment variable and `PATH` lookup that the transport chain
//! depends on is read here, once, at startup. The rest of the crate only
//! sees the resulting [`EnvSnapshot`], which tests build by hand.

use std::collections::{BTreeMap, BTreeSet};

pub const TMUX: &str = "TMUX";
pub const STY: &str = "STY";
pub const TERM: &str = "TERM";
pub const WAYLAND_DISPLAY: &str = "WAYLAND_DISPLAY";
pub const DISPLAY: &str = "DISPLAY";
pub const FORCE_OSC52: &str = "TERMCLIP_FORCE_OSC52";
pub const FORCE_NATIVE: &str = "TERMCLIP_FORCE_NATIVE";
pub const OSC52_MAX_B64: &str = "TERMCLIP_OSC52_MAX_B64";
pub const DEBUG: &str = "TERMCLIP_DEBUG";

const TRACKED_VARS: &[&str] = &[
    TMUX,
    STY,
    TERM,
    WAYLAND_DISPLAY,
    DISPLAY,
    FORCE_OSC52,
    FORCE_NATIVE,
    OSC52_MAX_B64,
    DEBUG,
];

/// Helper programs any transport candidate may invoke
pub const HELPER_PROGRAMS: &[&str] = &[
    "tmux",
    "pbcopy",
    "pbpaste",
    "clip",
    "powershell",
    "powershell.exe",
    "wl-copy",
    "wl-paste",
    "xclip",
    "xsel",
];

/// Host operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    MacOs,
    Windows,
    Unix,
}

impl OsFamily {
    pub fn current() -> Self {
        Self::from_target(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a family
    pub fn from_target(os: &str) -> Self {
        match os {
            "macos" => OsFamily::MacOs,
            "windows" => OsFamily::Windows,
            _ => OsFamily::Unix,
        }
    }
}

/// Read-only view of the signals relevant to clipboard transport selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
    os: OsFamily,
    installed: BTreeSet<String>,
}

impl EnvSnapshot {
    /// Capture the current process environment
    ///
    /// Helper programs are resolved through `PATH` only; nothing is executed.
    pub fn capture() -> Self {
        let vars = TRACKED_VARS
            .iter()
            .filter_map(|name| {
                std::env::var_os(name)
                    .map(|value| (name.to_string(), value.to_string_lossy().into_owned()))
            })
            .collect();

        let installed = HELPER_PROGRAMS
            .iter()
            .filter(|program| which::which(program).is_ok())
            .map(|program| program.to_string())
            .collect();

        Self {
            vars,
            os: OsFamily::current(),
            installed,
        }
    }

    /// An empty snapshot: no variables set, no helpers installed
    pub fn new(os: OsFamily) -> Self {
        Self {
            vars: BTreeMap::new(),
            os,
            installed: BTreeSet::new(),
        }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.installed.insert(program.to_string());
        self
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// True when the variable is set, even to an empty string
    pub fn is_set(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// True when the variable is set to a non-empty value
    pub fn is_non_empty(&self, name: &str) -> bool {
        self.var(name).is_some_and(|value| !value.is_empty())
    }

    /// True when the variable is exactly `1`
    pub fn flag(&self, name: &str) -> bool {
        self.var(name) == Some("1")
    }

    pub fn os(&self) -> OsFamily {
        self.os
    }

    pub fn has_program(&self, program: &str) -> bool {
        self.installed.contains(program)
    }

    pub fn installed_programs(&self) -> impl Iterator<Item = &str> {
        self.installed.iter().map(String::as_str)
    }
}
