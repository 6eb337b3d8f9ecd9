//! Transport chain
//!
//! A transport descriptor is an ordered list of tiers, each holding
//! candidates tagged with an applicability predicate and a strategy.
//! Evaluation is uniform for copy and paste:
//! - tiers run in order until one succeeds
//! - inside a tier the first applicable candidate is attempted and its
//!   result is the tier's result
//! - a tier with no applicable candidate is skipped

pub mod copy;
pub mod paste;
pub mod tmux;

pub use copy::{CopyReport, copy, copy_tiers};
pub use paste::{paste, paste_tiers};

use std::io::Write;

use crate::config::Config;
use crate::error::TermclipError;
use crate::osc52::{self, Passthrough};
use crate::payload::Payload;
use crate::probe::Capabilities;
use crate::process::{CommandRunner, Completion, ExternalCommand};
use crate::terminal::TerminalSink;

/// Applicability test evaluated against the probed capabilities
pub type Predicate = fn(&Capabilities, &Config) -> bool;

/// How a candidate moves the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Pipe the raw payload into the helper's stdin
    Pipe(ExternalCommand),
    /// Pipe the payload as UTF-8, replacing invalid sequences
    PipeText(ExternalCommand),
    /// tmux set-buffer followed by copy-buffer
    TmuxBuffer,
    /// OSC 52 escape sequence written to the terminal
    Osc52,
    /// Connect the helper's stdout to ours
    Stream(ExternalCommand),
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: &'static str,
    pub applies: Predicate,
    pub strategy: Strategy,
}

#[derive(Debug, Clone)]
pub struct Tier {
    pub name: &'static str,
    pub candidates: Vec<Candidate>,
}

impl Tier {
    /// First candidate whose predicate holds
    pub fn select(&self, caps: &Capabilities, config: &Config) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|candidate| (candidate.applies)(caps, config))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NotApplicable,
    Failed,
    Succeeded,
}

/// Result of evaluating one tier
#[derive(Debug)]
pub struct Attempt {
    pub tier: &'static str,
    /// Candidate that ran, `None` when nothing applied
    pub candidate: Option<&'static str>,
    pub outcome: Outcome,
    pub error: Option<TermclipError>,
}

#[derive(Debug, Default)]
pub struct ChainReport {
    pub attempts: Vec<Attempt>,
    /// The OSC 52 payload was cut at the configured bound
    pub truncated: bool,
}

impl ChainReport {
    /// Name of the candidate that succeeded
    pub fn winner(&self) -> Option<&'static str> {
        self.attempts
            .iter()
            .find(|attempt| attempt.outcome == Outcome::Succeeded)
            .and_then(|attempt| attempt.candidate)
    }

    /// Names of the candidates that actually ran, in order
    pub fn attempted(&self) -> Vec<&'static str> {
        self.attempts
            .iter()
            .filter(|attempt| attempt.outcome != Outcome::NotApplicable)
            .filter_map(|attempt| attempt.candidate)
            .collect()
    }
}

/// Everything a strategy may touch during one invocation
pub struct Context<'a> {
    pub caps: &'a Capabilities,
    pub config: &'a Config,
    pub runner: &'a mut dyn CommandRunner,
    pub terminal: &'a mut dyn TerminalSink,
    /// Where notes and warnings for the user go
    pub diagnostics: &'a mut dyn Write,
}

/// What a successful strategy reports back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Delivery {
    truncated: bool,
}

/// Evaluate `tiers` in order, stopping at the first success
pub fn run_chain(tiers: &[Tier], ctx: &mut Context<'_>, payload: &Payload) -> ChainReport {
    let mut report = ChainReport::default();

    for tier in tiers {
        let Some(candidate) = tier.select(ctx.caps, ctx.config) else {
            log::debug!("No {} transport applicable", tier.name);
            report.attempts.push(Attempt {
                tier: tier.name,
                candidate: None,
                outcome: Outcome::NotApplicable,
                error: None,
            });
            continue;
        };

        log::debug!("Trying {} ({} transport)", candidate.name, tier.name);
        match execute(&candidate.strategy, ctx, payload) {
            Ok(delivery) => {
                log::debug!("{} succeeded", candidate.name);
                report.truncated = delivery.truncated;
                report.attempts.push(Attempt {
                    tier: tier.name,
                    candidate: Some(candidate.name),
                    outcome: Outcome::Succeeded,
                    error: None,
                });
                break;
            }
            Err(e) => {
                log::debug!("{} failed: {}", candidate.name, e);
                report.attempts.push(Attempt {
                    tier: tier.name,
                    candidate: Some(candidate.name),
                    outcome: Outcome::Failed,
                    error: Some(e),
                });
            }
        }
    }

    report
}

fn execute(
    strategy: &Strategy,
    ctx: &mut Context<'_>,
    payload: &Payload,
) -> Result<Delivery, TermclipError> {
    match strategy {
        Strategy::Pipe(command) => {
            log::debug!("Piping {} bytes to {}", payload.len(), command.display());
            let completion = ctx.runner.feed(command, payload.as_bytes())?;
            require_success(command, completion)
        }
        Strategy::PipeText(command) => {
            let text = payload.to_text_lossy();
            log::debug!("Piping {} bytes of text to {}", text.len(), command.display());
            let completion = ctx.runner.feed(command, text.as_bytes())?;
            require_success(command, completion)
        }
        Strategy::TmuxBuffer => {
            tmux::copy_via_buffer(&mut *ctx.runner, &payload.to_text_lossy())?;
            Ok(Delivery::default())
        }
        Strategy::Osc52 => {
            let sequence = osc52::build_sequence(
                payload.as_bytes(),
                ctx.config.copy.osc52_max_b64,
                Passthrough::for_session(ctx.caps),
            );
            ctx.terminal.deliver(&sequence.bytes)?;
            Ok(Delivery {
                truncated: sequence.truncated,
            })
        }
        Strategy::Stream(command) => {
            log::debug!("Streaming output of {}", command.display());
            let completion = ctx.runner.stream_to_stdout(command)?;
            require_success(command, completion)
        }
    }
}

fn require_success(
    command: &ExternalCommand,
    completion: Completion,
) -> Result<Delivery, TermclipError> {
    match completion {
        Completion::Exited(Some(0)) => Ok(Delivery::default()),
        Completion::Detached => {
            log::debug!(
                "{} still running, assuming it is serving the clipboard",
                command.program
            );
            Ok(Delivery::default())
        }
        Completion::Exited(code) => Err(TermclipError::ExitStatus {
            program: command.program.clone(),
            status: match code {
                Some(code) => format!("code {}", code),
                None => "no exit code".to_string(),
            },
        }),
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod transport_tests;
