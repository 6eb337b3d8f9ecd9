//! External command primitive
//!
//! Every helper invocation goes through [`CommandRunner`]: spawn, stream the
//! payload into stdin, close it, then wait for the exit status. A bounded
//! wait whose deadline passes is reported as [`Completion::Detached`],
//! which callers count as success.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::TermclipError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to wait for a helper after its input is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    UntilExit,
    /// Helpers like xclip fork into the background to keep serving the
    /// selection; still running at the deadline means it took the data.
    DetachAfter(Duration),
}

/// A helper program and its argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub wait: Wait,
}

impl ExternalCommand {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            wait: Wait::UntilExit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn detach_after(mut self, timeout: Duration) -> Self {
        self.wait = Wait::DetachAfter(timeout);
        self
    }

    /// Command line for log messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> TermclipError {
        TermclipError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

/// How a helper run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Exit code, `None` when killed by a signal
    Exited(Option<i32>),
    Detached,
}

impl Completion {
    pub fn is_success(&self) -> bool {
        matches!(self, Completion::Exited(Some(0)) | Completion::Detached)
    }
}

/// Output of a helper run for its text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captured {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait CommandRunner {
    /// Run `command` with `input` written to its stdin
    fn feed(&mut self, command: &ExternalCommand, input: &[u8])
    -> Result<Completion, TermclipError>;

    /// Run `command` and collect its stdout and stderr
    fn capture(&mut self, command: &ExternalCommand) -> Result<Captured, TermclipError>;

    /// Run `command` with its stdout connected to ours
    fn stream_to_stdout(&mut self, command: &ExternalCommand)
    -> Result<Completion, TermclipError>;
}

/// Runs helpers as real child processes
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn feed(
        &mut self,
        command: &ExternalCommand,
        input: &[u8],
    ) -> Result<Completion, TermclipError> {
        // Detaching helpers would otherwise keep chatting on our stderr
        let stderr = match command.wait {
            Wait::UntilExit => Stdio::inherit(),
            Wait::DetachAfter(_) => Stdio::null(),
        };

        let mut child = command
            .to_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(stderr)
            .spawn()
            .map_err(|e| command.spawn_error(e))?;

        // Dropping stdin closes the pipe so the helper sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input)
                .and_then(|_| stdin.flush())
                .map_err(|source| TermclipError::Pipe {
                    program: command.program.clone(),
                    source,
                })?;
        }

        match command.wait {
            Wait::UntilExit => Ok(Completion::Exited(child.wait()?.code())),
            Wait::DetachAfter(timeout) => wait_bounded(&mut child, timeout),
        }
    }

    fn capture(&mut self, command: &ExternalCommand) -> Result<Captured, TermclipError> {
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command.spawn_error(e))?;

        Ok(Captured {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn stream_to_stdout(
        &mut self,
        command: &ExternalCommand,
    ) -> Result<Completion, TermclipError> {
        let status = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| command.spawn_error(e))?;

        Ok(Completion::Exited(status.code()))
    }
}

/// Poll for exit until `timeout`; the child is left running on expiry
fn wait_bounded(child: &mut Child, timeout: Duration) -> Result<Completion, TermclipError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Completion::Exited(status.code()));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(Completion::Detached);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod process_tests;
