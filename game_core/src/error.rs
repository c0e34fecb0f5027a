//! Error types for the game core and its platform collaborators.
//!
//! Gameplay itself has no recoverable errors. Everything here is either a
//! startup problem (config) or a fatal collaborator fault.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can stop the game.
#[derive(Error, Debug)]
pub enum GameError {
    /// The platform collaborator failed to talk to its window or terminal.
    #[error("platform i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// A config file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has mistyped fields.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config parsed but its values break a game invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
