use std::path::PathBuf;

use thiserror::Error;

/// Domain failures that surface to the user as non-blocking notices.
#[derive(Debug, Error)]
pub enum EchoError {
    #[error("session length must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("session log at {} could not be read ({reason}); starting a fresh log", .path.display())]
    MissingOrCorruptLog { path: PathBuf, reason: String },

    #[error("text generation service failed: {0}")]
    ExternalService(String),

    #[error("synthesized tone is silent; nothing to normalize")]
    SilentBuffer,
}
