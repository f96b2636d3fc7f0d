//! Error types for the game runtime.
//!
//! Gameplay outcomes (collisions, running out of lives, dropped apple
//! placements) are never errors; they surface as session state.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the math snake runtime.
#[derive(Error, Debug)]
pub enum MathSnakeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSettings { field: &'static str, reason: String },
}

/// Result type alias for the math snake runtime.
pub type Result<T> = std::result::Result<T, MathSnakeError>;
