//! OSC 52 clipboard codec
//!
//! Builds the terminal escape sequence that asks the emulator to set its
//! clipboard, wrapped for tmux or GNU screen when the program runs inside
//! one of them.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::probe::Capabilities;

/// OSC 52 introducer with the clipboard selection (`c`)
pub const OSC52_PREFIX: &str = "\x1b]52;c;";
/// ST, used for every sequence this module emits
pub const STRING_TERMINATOR: &str = "\x1b\\";
/// tmux DCS pass-through introducer
pub const TMUX_PREFIX: &str = "\x1bPtmux;";
/// GNU screen DCS pass-through introducer
pub const SCREEN_PREFIX: &str = "\x1bP";

/// Envelope needed to get the sequence past a multiplexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passthrough {
    None,
    Tmux,
    Screen,
}

impl Passthrough {
    /// tmux wins when both sessions are detected
    pub fn for_session(caps: &Capabilities) -> Self {
        if caps.tmux {
            Passthrough::Tmux
        } else if caps.screen {
            Passthrough::Screen
        } else {
            Passthrough::None
        }
    }
}

/// A ready-to-write escape sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Osc52Sequence {
    pub bytes: Vec<u8>,
    /// The base64 text was cut at the configured bound
    pub truncated: bool,
}

/// Base64-encode `payload`, keeping at most `max_b64` characters
pub fn encode_base64(payload: &[u8], max_b64: usize) -> (String, bool) {
    let mut encoded = STANDARD.encode(payload);
    if encoded.len() > max_b64 {
        // Base64 output is ASCII, so any index is a char boundary
        encoded.truncate(max_b64);
        (encoded, true)
    } else {
        (encoded, false)
    }
}

/// Format: `ESC ] 52 ; c ; {base64} ESC \`
pub fn encode_osc52(base64: &str) -> String {
    format!("{}{}{}", OSC52_PREFIX, base64, STRING_TERMINATOR)
}

/// Wrap an OSC sequence in the pass-through envelope
///
/// tmux ends its DCS at the first lone ESC, so every ESC inside the inner
/// sequence is doubled. screen needs no doubling.
pub fn wrap(osc: &str, passthrough: Passthrough) -> String {
    match passthrough {
        Passthrough::None => osc.to_string(),
        Passthrough::Tmux => format!(
            "{}{}{}",
            TMUX_PREFIX,
            osc.replace('\x1b', "\x1b\x1b"),
            STRING_TERMINATOR
        ),
        Passthrough::Screen => format!("{}{}{}", SCREEN_PREFIX, osc, STRING_TERMINATOR),
    }
}

/// Encode, bound and wrap `payload` in one step
pub fn build_sequence(payload: &[u8], max_b64: usize, passthrough: Passthrough) -> Osc52Sequence {
    let (base64, truncated) = encode_base64(payload, max_b64);
    let osc = encode_osc52(&base64);
    let wrapped = wrap(&osc, passthrough);

    log::debug!(
        "OSC 52: base64 {} chars (max {}), sequence {} bytes, passthrough {:?}",
        base64.len(),
        max_b64,
        wrapped.len(),
        passthrough
    );

    Osc52Sequence {
        bytes: wrapped.into_bytes(),
        truncated,
    }
}

#[cfg(test)]
#[path = "osc52_tests.rs"]
mod osc52_tests;
