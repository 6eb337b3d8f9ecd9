//! Shared test utilities for termclip
//!
//! Fake process runner and terminal so transport tests never spawn real
//! helpers or write escape sequences to the test runner's tty.

#[cfg(test)]
pub mod test_helpers {
    use std::collections::{HashMap, HashSet};

    use crate::config::Config;
    use crate::environment::{EnvSnapshot, OsFamily};
    use crate::error::TermclipError;
    use crate::probe::Capabilities;
    use crate::process::{Captured, CommandRunner, Completion, ExternalCommand};
    use crate::terminal::TerminalSink;
    use crate::transport::Context;

    /// One recorded helper invocation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Feed {
            command: ExternalCommand,
            input: Vec<u8>,
        },
        Capture(ExternalCommand),
        Stream(ExternalCommand),
    }

    impl Call {
        pub fn command(&self) -> &ExternalCommand {
            match self {
                Call::Feed { command, .. } | Call::Capture(command) | Call::Stream(command) => {
                    command
                }
            }
        }
    }

    /// Records calls; every program succeeds unless told otherwise
    #[derive(Debug, Default)]
    pub struct FakeRunner {
        pub calls: Vec<Call>,
        failing: HashSet<String>,
        detaching: HashSet<String>,
        unspawnable: HashSet<String>,
        captures: HashMap<String, Captured>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// `program` exits with code 1
        pub fn fail(mut self, program: &str) -> Self {
            self.failing.insert(program.to_string());
            self
        }

        /// `program` is still running when the bounded wait expires
        pub fn detach(mut self, program: &str) -> Self {
            self.detaching.insert(program.to_string());
            self
        }

        /// `program` cannot be started
        pub fn unspawnable(mut self, program: &str) -> Self {
            self.unspawnable.insert(program.to_string());
            self
        }

        /// Canned output for the exact command line `display`
        pub fn on_capture(mut self, display: &str, captured: Captured) -> Self {
            self.captures.insert(display.to_string(), captured);
            self
        }

        /// Programs invoked, in order
        pub fn programs(&self) -> Vec<&str> {
            self.calls
                .iter()
                .map(|call| call.command().program.as_str())
                .collect()
        }

        /// Calls that were not reads of tmux state (`-V`, `show-options`)
        pub fn transport_calls(&self) -> Vec<&Call> {
            self.calls
                .iter()
                .filter(|call| {
                    let args = &call.command().args;
                    !matches!(args.first().map(String::as_str), Some("-V" | "show-options"))
                })
                .collect()
        }

        fn check_spawn(&self, command: &ExternalCommand) -> Result<(), TermclipError> {
            if self.unspawnable.contains(&command.program) {
                return Err(TermclipError::Spawn {
                    program: command.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                });
            }
            Ok(())
        }

        fn completion(&self, command: &ExternalCommand) -> Completion {
            if self.failing.contains(&command.program) {
                Completion::Exited(Some(1))
            } else if self.detaching.contains(&command.program) {
                Completion::Detached
            } else {
                Completion::Exited(Some(0))
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn feed(
            &mut self,
            command: &ExternalCommand,
            input: &[u8],
        ) -> Result<Completion, TermclipError> {
            self.calls.push(Call::Feed {
                command: command.clone(),
                input: input.to_vec(),
            });
            self.check_spawn(command)?;
            Ok(self.completion(command))
        }

        fn capture(&mut self, command: &ExternalCommand) -> Result<Captured, TermclipError> {
            self.calls.push(Call::Capture(command.clone()));
            self.check_spawn(command)?;
            if let Some(captured) = self.captures.get(&command.display()) {
                return Ok(captured.clone());
            }
            let code = match self.completion(command) {
                Completion::Exited(code) => code,
                Completion::Detached => Some(0),
            };
            Ok(Captured {
                code,
                ..Captured::default()
            })
        }

        fn stream_to_stdout(
            &mut self,
            command: &ExternalCommand,
        ) -> Result<Completion, TermclipError> {
            self.calls.push(Call::Stream(command.clone()));
            self.check_spawn(command)?;
            Ok(self.completion(command))
        }
    }

    /// Collects delivered escape sequences
    #[derive(Debug)]
    pub struct FakeTerminal {
        pub writes: Vec<Vec<u8>>,
        available: bool,
    }

    impl FakeTerminal {
        pub fn new() -> Self {
            Self {
                writes: Vec::new(),
                available: true,
            }
        }

        /// Neither a controlling tty nor a terminal stdout
        pub fn unavailable() -> Self {
            Self {
                writes: Vec::new(),
                available: false,
            }
        }
    }

    impl TerminalSink for FakeTerminal {
        fn deliver(&mut self, bytes: &[u8]) -> Result<(), TermclipError> {
            if !self.available {
                return Err(TermclipError::NoTerminal);
            }
            self.writes.push(bytes.to_vec());
            Ok(())
        }
    }

    /// Owns everything a transport [`Context`] borrows
    pub struct Harness {
        pub caps: Capabilities,
        pub config: Config,
        pub runner: FakeRunner,
        pub terminal: FakeTerminal,
        pub diagnostics: Vec<u8>,
    }

    impl Harness {
        pub fn new(snapshot: EnvSnapshot) -> Self {
            Self {
                caps: Capabilities::probe(&snapshot),
                config: Config::default(),
                runner: FakeRunner::new(),
                terminal: FakeTerminal::new(),
                diagnostics: Vec::new(),
            }
        }

        pub fn with_runner(mut self, runner: FakeRunner) -> Self {
            self.runner = runner;
            self
        }

        pub fn with_terminal(mut self, terminal: FakeTerminal) -> Self {
            self.terminal = terminal;
            self
        }

        pub fn with_config(mut self, config: Config) -> Self {
            self.config = config;
            self
        }

        pub fn context(&mut self) -> Context<'_> {
            Context {
                caps: &self.caps,
                config: &self.config,
                runner: &mut self.runner,
                terminal: &mut self.terminal,
                diagnostics: &mut self.diagnostics,
            }
        }

        pub fn diagnostics(&self) -> String {
            String::from_utf8_lossy(&self.diagnostics).into_owned()
        }
    }

    /// A Linux box with no multiplexer, no display and no helpers
    pub fn bare_linux() -> EnvSnapshot {
        EnvSnapshot::new(OsFamily::Unix)
    }

    pub fn tmux_on() -> Captured {
        Captured {
            code: Some(0),
            stdout: "on\n".to_string(),
            stderr: String::new(),
        }
    }
}
