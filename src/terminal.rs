//! OSC 52 delivery to the user's terminal

use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};

use crate::error::TermclipError;

#[cfg(windows)]
const TTY_PATH: &str = "CONOUT$";
#[cfg(not(windows))]
const TTY_PATH: &str = "/dev/tty";

pub trait TerminalSink {
    /// Write an escape sequence where the terminal emulator will parse it
    fn deliver(&mut self, bytes: &[u8]) -> Result<(), TermclipError>;
}

/// Controlling tty first, then stdout if (and only if) it is a terminal
///
/// An escape sequence written into a pipe or file would corrupt the data
/// instead of reaching the emulator.
#[derive(Debug, Default)]
pub struct ControllingTerminal;

impl TerminalSink for ControllingTerminal {
    fn deliver(&mut self, bytes: &[u8]) -> Result<(), TermclipError> {
        match write_to_tty(bytes) {
            Ok(()) => {
                log::debug!("Wrote {} bytes to {}", bytes.len(), TTY_PATH);
                return Ok(());
            }
            Err(e) => log::debug!("Failed to write to {}: {}", TTY_PATH, e),
        }

        let stdout = io::stdout();
        if !stdout.is_terminal() {
            log::debug!("stdout is not a terminal, not writing OSC 52 there");
            return Err(TermclipError::NoTerminal);
        }

        let mut handle = stdout.lock();
        handle.write_all(bytes)?;
        handle.flush()?;
        log::debug!("Wrote {} bytes to stdout", bytes.len());
        Ok(())
    }
}

fn write_to_tty(bytes: &[u8]) -> io::Result<()> {
    let mut tty = OpenOptions::new().write(true).open(TTY_PATH)?;
    tty.write_all(bytes)?;
    tty.flush()
}
