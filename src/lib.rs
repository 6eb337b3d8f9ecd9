//! termclip library - Pipe-friendly cross-platform clipboard tool
//!
//! This library exposes the transport chain and its collaborators so they
//! can be driven with a synthetic environment in tests.

pub mod config;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod logging;
pub mod osc52;
pub mod payload;
pub mod probe;
pub mod process;
pub mod terminal;
#[cfg(test)]
pub mod test_utils;
pub mod transport;

// Re-export commonly used types for convenience
pub use config::Config;
pub use environment::EnvSnapshot;
pub use error::TermclipError;
pub use payload::Payload;
pub use probe::Capabilities;
