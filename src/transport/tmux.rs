//! tmux adapter
//!
//! tmux sits between us and the real terminal, so it gets the first chance
//! at the payload through its own paste buffer.

use crate::error::TermclipError;
use crate::process::{Captured, CommandRunner, ExternalCommand};

pub const TMUX: &str = "tmux";

/// Global tmux options that decide whether clipboard data leaves tmux
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TmuxConfig {
    pub set_clipboard: bool,
    pub allow_passthrough: bool,
}

impl TmuxConfig {
    pub fn is_complete(&self) -> bool {
        self.set_clipboard && self.allow_passthrough
    }
}

/// Query `set-clipboard` and `allow-passthrough`; unreadable counts as off
pub fn read_config(runner: &mut dyn CommandRunner) -> TmuxConfig {
    let config = TmuxConfig {
        set_clipboard: option_enabled(runner, "set-clipboard"),
        allow_passthrough: option_enabled(runner, "allow-passthrough"),
    };
    log::debug!(
        "tmux set-clipboard: {}, allow-passthrough: {}",
        config.set_clipboard,
        config.allow_passthrough
    );
    config
}

fn option_enabled(runner: &mut dyn CommandRunner, option: &str) -> bool {
    let command = ExternalCommand::new(TMUX).args(["show-options", "-g", option]);
    match runner.capture(&command) {
        Ok(captured) if captured.is_success() => captured.stdout.contains("on"),
        Ok(captured) => {
            log::debug!("{} failed: {}", command.display(), captured.stderr.trim());
            false
        }
        Err(e) => {
            log::debug!("Failed to check tmux option {}: {}", option, e);
            false
        }
    }
}

pub fn set_buffer_command(text: &str) -> ExternalCommand {
    ExternalCommand::new(TMUX).args(["set-buffer", "--", text])
}

pub fn copy_buffer_command() -> ExternalCommand {
    ExternalCommand::new(TMUX).arg("copy-buffer")
}

pub fn show_buffer_command() -> ExternalCommand {
    ExternalCommand::new(TMUX).arg("show-buffer")
}

/// Put `text` into the tmux buffer, then have tmux copy it outward
///
/// Either step failing fails the whole transport; an older tmux answering
/// "unknown command" to the second step is an ordinary failure.
pub fn copy_via_buffer(runner: &mut dyn CommandRunner, text: &str) -> Result<(), TermclipError> {
    match runner.capture(&ExternalCommand::new(TMUX).arg("-V")) {
        Ok(version) => log::debug!("tmux version: {}", version.stdout.trim()),
        Err(e) => log::debug!("Failed to read tmux version: {}", e),
    }

    let set_buffer = set_buffer_command(text);
    let captured = runner.capture(&set_buffer)?;
    if !captured.is_success() {
        log::debug!("tmux set-buffer failed: {}", captured.stderr.trim());
        return Err(exit_error("tmux set-buffer", &captured));
    }

    let copy_buffer = copy_buffer_command();
    let captured = runner.capture(&copy_buffer)?;
    if captured.is_success() {
        log::debug!("tmux copy-buffer succeeded");
        return Ok(());
    }

    if captured.stderr.contains("unknown command") {
        log::debug!("tmux copy-buffer not available in this tmux version");
    } else {
        log::debug!("tmux copy-buffer failed: {}", captured.stderr.trim());
    }
    Err(exit_error("tmux copy-buffer", &captured))
}

/// The set-buffer command line carries the payload, so errors name the step
fn exit_error(step: &str, captured: &Captured) -> TermclipError {
    TermclipError::ExitStatus {
        program: step.to_string(),
        status: match captured.code {
            Some(code) => format!("code {}", code),
            None => "no exit code".to_string(),
        },
    }
}
