//! services/client/src/error.rs
//!
//! Defines the primary error type for the interactive client.

use crate::config::ConfigError;
use crate::ui::protocol::ProtocolError;
use quiz_master_core::{ControllerError, ValidationError};

/// The primary error type for the `quiz_client` crate.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The user's input was rejected before reaching the provider.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The requested action is not allowed in the current phase.
    #[error("{0}")]
    Controller(#[from] ControllerError),

    /// The typed line is not a command.
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    /// Represents a standard Input/Output error (e.g., reading an attachment).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
