use thiserror::Error;

use crate::diagnostics::ExhaustedHint;

#[derive(Debug, Error)]
pub enum TermclipError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write payload to {program}: {source}")]
    Pipe {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ExitStatus { program: String, status: String },

    #[error("no terminal available for OSC 52")]
    NoTerminal,

    #[error("{0}")]
    Exhausted(ExhaustedHint),

    #[error(
        "paste not supported here (no native clipboard command found). On SSH, run --paste locally."
    )]
    PasteUnsupported,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
