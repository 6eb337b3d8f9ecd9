//! User-facing messages printed on stderr
//!
//! Per-candidate failures are only traced through `log`; these messages
//! cover the outcomes a user needs to act on.

use std::fmt;

use crate::transport::tmux::TmuxConfig;

pub const TRUNCATION_NOTE: &str = "[termclip] Note: content truncated to fit OSC 52 limits.";

const TMUX_RELOAD: &str = "   Then run: tmux source-file ~/.tmux.conf";

/// Why every copy transport failed, phrased as a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustedHint {
    /// Inside tmux with clipboard or pass-through support switched off
    TmuxMisconfigured,
    /// Inside a well-configured tmux; the outer terminal ignored OSC 52
    TerminalRefused,
    /// No helper found and OSC 52 could not be delivered
    NoMethod,
}

impl ExhaustedHint {
    /// `tmux` is the tmux setup when running inside tmux
    pub fn for_session(tmux: Option<&TmuxConfig>) -> Self {
        match tmux {
            Some(config) if !config.is_complete() => ExhaustedHint::TmuxMisconfigured,
            Some(_) => ExhaustedHint::TerminalRefused,
            None => ExhaustedHint::NoMethod,
        }
    }
}

impl fmt::Display for ExhaustedHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExhaustedHint::TmuxMisconfigured => write!(
                f,
                "clipboard failed. Your tmux config may need:\n  \
                 set -g set-clipboard on\n  \
                 set -g allow-passthrough on\n\
                 Then: tmux source-file ~/.tmux.conf"
            ),
            ExhaustedHint::TerminalRefused => write!(
                f,
                "clipboard failed. Your terminal may not support OSC 52.\n\
                 Try a terminal that supports OSC 52 (kitty, alacritty, newer gnome-terminal)."
            ),
            ExhaustedHint::NoMethod => write!(
                f,
                "no clipboard method worked (no pbcopy/clip/wl-copy/xclip/xsel, or terminal refused OSC 52)."
            ),
        }
    }
}

/// Lines telling the user which tmux options to enable, empty when none
pub fn tmux_setup_advice(config: &TmuxConfig) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if !config.set_clipboard {
        lines.push(
            "Warning: tmux clipboard integration is OFF. Add 'set -g set-clipboard on' to ~/.tmux.conf",
        );
    }
    if !config.allow_passthrough {
        lines.push(
            "Warning: tmux passthrough is OFF. Add 'set -g allow-passthrough on' to ~/.tmux.conf for better OSC 52 support",
        );
    }
    if !lines.is_empty() {
        lines.push(TMUX_RELOAD);
    }
    lines
}

/// Note printed after an OSC 52 copy from inside tmux
pub fn osc52_tmux_note(config: &TmuxConfig) -> &'static str {
    if config.is_complete() {
        "Clipboard data sent via OSC 52."
    } else {
        "Clipboard data sent via OSC 52. If pasting doesn't work, check tmux config above."
    }
}
