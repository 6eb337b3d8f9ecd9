//! Capability prober
//!
//! Turns an [`EnvSnapshot`] into the availability flags the transport
//! candidates are gated on. Pure: no environment reads, no process spawns.

use crate::environment::{self, EnvSnapshot, OsFamily};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Running inside a tmux session
    pub tmux: bool,
    /// Running inside a GNU screen session
    pub screen: bool,
    pub wayland: bool,
    pub x11: bool,
    pub os: OsFamily,
    installed: Vec<String>,
}

impl Capabilities {
    pub fn probe(snapshot: &EnvSnapshot) -> Self {
        let screen = snapshot.is_non_empty(environment::STY)
            && snapshot
                .var(environment::TERM)
                .is_some_and(|term| term.starts_with("screen"));

        Self {
            tmux: snapshot.is_set(environment::TMUX),
            screen,
            wayland: snapshot.is_non_empty(environment::WAYLAND_DISPLAY),
            x11: snapshot.is_non_empty(environment::DISPLAY),
            os: snapshot.os(),
            installed: snapshot.installed_programs().map(str::to_string).collect(),
        }
    }

    /// Whether `program` resolved on `PATH` when the snapshot was taken
    pub fn has(&self, program: &str) -> bool {
        self.installed.iter().any(|p| p == program)
    }

    /// macOS or any other non-Windows host
    pub fn unix_like(&self) -> bool {
        self.os != OsFamily::Windows
    }
}
