//! Copy direction: stdin bytes to the clipboard
//!
//! Priority: tmux buffer, then the OS clipboard helper, then OSC 52.

use std::io::Write;
use std::time::Duration;

use super::tmux::{self, TmuxConfig};
use super::{Candidate, Context, Strategy, Tier, run_chain};
use crate::config::Config;
use crate::diagnostics::{self, ExhaustedHint};
use crate::environment::OsFamily;
use crate::error::TermclipError;
use crate::payload::Payload;
use crate::probe::Capabilities;
use crate::process::ExternalCommand;

/// X11 helpers still running after this long are serving the selection
pub const X11_DETACH_AFTER: Duration = Duration::from_millis(200);

const POWERSHELL_SET: &str = "Set-Clipboard -Value ([Console]::In.ReadToEnd())";

/// Outcome of a successful copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyReport {
    /// Candidate that took the payload, `None` for empty input
    pub transport: Option<&'static str>,
    pub truncated: bool,
}

pub fn copy_tiers() -> Vec<Tier> {
    vec![
        Tier {
            name: "multiplexer",
            candidates: vec![Candidate {
                name: "tmux",
                applies: tmux_applies,
                strategy: Strategy::TmuxBuffer,
            }],
        },
        Tier {
            name: "native",
            candidates: native_candidates(),
        },
        Tier {
            name: "osc52",
            candidates: vec![Candidate {
                name: "osc52",
                applies: osc52_applies,
                strategy: Strategy::Osc52,
            }],
        },
    ]
}

fn native_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            name: "pbcopy",
            applies: pbcopy_applies,
            strategy: Strategy::Pipe(ExternalCommand::new("pbcopy")),
        },
        Candidate {
            name: "clip",
            applies: clip_applies,
            strategy: Strategy::Pipe(ExternalCommand::new("clip")),
        },
        Candidate {
            name: "powershell",
            applies: powershell_applies,
            strategy: Strategy::PipeText(
                ExternalCommand::new("powershell").args(["-NoProfile", "-Command", POWERSHELL_SET]),
            ),
        },
        Candidate {
            name: "wl-copy",
            // Without -f wl-copy forks and returns immediately
            applies: wl_copy_applies,
            strategy: Strategy::Pipe(ExternalCommand::new("wl-copy")),
        },
        Candidate {
            name: "xclip",
            applies: xclip_applies,
            strategy: Strategy::Pipe(
                ExternalCommand::new("xclip")
                    .args(["-selection", "clipboard", "-in", "-quiet"])
                    .detach_after(X11_DETACH_AFTER),
            ),
        },
        Candidate {
            name: "xsel",
            applies: xsel_applies,
            strategy: Strategy::Pipe(
                ExternalCommand::new("xsel")
                    .args(["--clipboard", "--input"])
                    .detach_after(X11_DETACH_AFTER),
            ),
        },
    ]
}

fn tmux_applies(caps: &Capabilities, config: &Config) -> bool {
    !config.copy.force_osc52 && caps.tmux && caps.has(tmux::TMUX)
}

fn native_allowed(config: &Config) -> bool {
    !config.copy.force_osc52
}

fn pbcopy_applies(caps: &Capabilities, config: &Config) -> bool {
    native_allowed(config) && caps.os == OsFamily::MacOs && caps.has("pbcopy")
}

fn clip_applies(caps: &Capabilities, config: &Config) -> bool {
    native_allowed(config) && caps.os == OsFamily::Windows && caps.has("clip")
}

fn powershell_applies(caps: &Capabilities, config: &Config) -> bool {
    native_allowed(config) && caps.os == OsFamily::Windows && caps.has("powershell")
}

fn wl_copy_applies(caps: &Capabilities, config: &Config) -> bool {
    native_allowed(config) && caps.unix_like() && caps.wayland && caps.has("wl-copy")
}

fn xclip_applies(caps: &Capabilities, config: &Config) -> bool {
    native_allowed(config) && caps.unix_like() && caps.x11 && caps.has("xclip")
}

fn xsel_applies(caps: &Capabilities, config: &Config) -> bool {
    native_allowed(config) && caps.unix_like() && caps.x11 && caps.has("xsel")
}

fn osc52_applies(_caps: &Capabilities, config: &Config) -> bool {
    !config.copy.force_native
}

/// Copy `payload` through the first transport that takes it
///
/// Empty input succeeds without touching any transport. Inside tmux the
/// tmux setup is checked first and advice is written to diagnostics.
pub fn copy(payload: &Payload, ctx: &mut Context<'_>) -> Result<CopyReport, TermclipError> {
    if payload.is_empty() {
        log::debug!("No data to copy");
        return Ok(CopyReport::default());
    }
    log::debug!("Copying {} bytes", payload.len());

    let tmux_config = if ctx.caps.tmux && ctx.caps.has(tmux::TMUX) {
        let config = tmux::read_config(&mut *ctx.runner);
        for line in diagnostics::tmux_setup_advice(&config) {
            let _ = writeln!(ctx.diagnostics, "{}", line);
        }
        Some(config)
    } else {
        None
    };

    let report = run_chain(&copy_tiers(), ctx, payload);

    let Some(transport) = report.winner() else {
        log::debug!("All clipboard methods failed");
        return Err(TermclipError::Exhausted(ExhaustedHint::for_session(
            tmux_config.as_ref(),
        )));
    };

    if transport == "osc52" {
        write_osc52_notes(ctx, report.truncated, tmux_config.as_ref());
    }

    Ok(CopyReport {
        transport: Some(transport),
        truncated: report.truncated,
    })
}

fn write_osc52_notes(ctx: &mut Context<'_>, truncated: bool, tmux_config: Option<&TmuxConfig>) {
    if truncated {
        let _ = writeln!(ctx.diagnostics, "{}", diagnostics::TRUNCATION_NOTE);
    }
    if let Some(config) = tmux_config {
        let _ = writeln!(ctx.diagnostics, "{}", diagnostics::osc52_tmux_note(config));
    }
}

#[cfg(test)]
#[path = "copy_tests.rs"]
mod copy_tests;
