//! @acp:module "Errors"
//! @acp:summary "Library error type and result alias"
//! @acp:domain game
//! @acp:layer utility

use std::path::PathBuf;

use thiserror::Error;

use crate::rules::MoveRejection;

/// Result type for Primus library operations
pub type Result<T> = std::result::Result<T, PrimusError>;

/// @acp:summary "Errors raised by the Primus library"
#[derive(Debug, Error)]
pub enum PrimusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A configuration value is out of range or inconsistent
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// A deck catalog failed validation
    #[error("Invalid deck catalog: {0}")]
    InvalidDeck(String),

    #[error("Unsupported deck file format: {0}")]
    UnsupportedDeckFormat(PathBuf),

    #[error("Cannot draw from an empty deck")]
    EmptyDeck,

    /// The scheduler was built without any seat
    #[error("Zero players provided to the scheduler")]
    NoPlayers,

    /// A move was refused by the rules
    #[error("Move rejected: {0}")]
    Rejected(#[from] MoveRejection),
}
