//! Paste direction: clipboard to stdout
//!
//! No OSC 52 here; the escape sequence only travels from program to
//! terminal. The first applicable candidate decides the result.

use super::tmux;
use super::{Candidate, Context, Outcome, Strategy, Tier, run_chain};
use crate::config::Config;
use crate::environment::OsFamily;
use crate::error::TermclipError;
use crate::payload::Payload;
use crate::probe::Capabilities;
use crate::process::ExternalCommand;

const POWERSHELL_GET: &str = "Get-Clipboard -Raw";

pub fn paste_tiers() -> Vec<Tier> {
    let powershell = |program: &str| {
        Strategy::Stream(ExternalCommand::new(program).args([
            "-NoProfile",
            "-Command",
            POWERSHELL_GET,
        ]))
    };

    vec![Tier {
        name: "paste",
        candidates: vec![
            Candidate {
                name: "tmux",
                applies: tmux_applies,
                strategy: Strategy::Stream(tmux::show_buffer_command()),
            },
            Candidate {
                name: "pbpaste",
                applies: pbpaste_applies,
                strategy: Strategy::Stream(ExternalCommand::new("pbpaste")),
            },
            Candidate {
                name: "powershell",
                applies: powershell_applies,
                strategy: powershell("powershell"),
            },
            Candidate {
                name: "powershell.exe",
                applies: powershell_exe_applies,
                strategy: powershell("powershell.exe"),
            },
            Candidate {
                name: "wl-paste",
                applies: wl_paste_applies,
                strategy: Strategy::Stream(ExternalCommand::new("wl-paste").arg("-n")),
            },
            Candidate {
                name: "xclip",
                applies: xclip_applies,
                strategy: Strategy::Stream(
                    ExternalCommand::new("xclip").args(["-selection", "clipboard", "-o"]),
                ),
            },
            Candidate {
                name: "xsel",
                applies: xsel_applies,
                strategy: Strategy::Stream(
                    ExternalCommand::new("xsel").args(["--clipboard", "--output"]),
                ),
            },
        ],
    }]
}

fn tmux_applies(caps: &Capabilities, _config: &Config) -> bool {
    caps.tmux && caps.has(tmux::TMUX)
}

fn pbpaste_applies(caps: &Capabilities, _config: &Config) -> bool {
    caps.os == OsFamily::MacOs && caps.has("pbpaste")
}

fn powershell_applies(caps: &Capabilities, _config: &Config) -> bool {
    caps.os == OsFamily::Windows && caps.has("powershell")
}

fn powershell_exe_applies(caps: &Capabilities, _config: &Config) -> bool {
    caps.os == OsFamily::Windows && caps.has("powershell.exe")
}

fn wl_paste_applies(caps: &Capabilities, _config: &Config) -> bool {
    caps.unix_like() && caps.wayland && caps.has("wl-paste")
}

fn xclip_applies(caps: &Capabilities, _config: &Config) -> bool {
    caps.unix_like() && caps.x11 && caps.has("xclip")
}

fn xsel_applies(caps: &Capabilities, _config: &Config) -> bool {
    caps.unix_like() && caps.x11 && caps.has("xsel")
}

/// Stream the clipboard to stdout, returning the helper that served it
pub fn paste(ctx: &mut Context<'_>) -> Result<&'static str, TermclipError> {
    let mut report = run_chain(&paste_tiers(), ctx, &Payload::default());

    // One tier, so exactly one attempt
    let Some(attempt) = report.attempts.pop() else {
        return Err(TermclipError::PasteUnsupported);
    };

    match (attempt.outcome, attempt.candidate, attempt.error) {
        (Outcome::Succeeded, Some(name), _) => Ok(name),
        (Outcome::Failed, _, Some(e)) => Err(e),
        _ => Err(TermclipError::PasteUnsupported),
    }
}

#[cfg(test)]
#[path = "paste_tests.rs"]
mod paste_tests;
