//! crates/quiz_master_core/src/ports.rs
//!
//! Defines the service contract (trait) for the external content-generation provider.
//! The trait forms the boundary of the hexagonal architecture, keeping the core
//! independent of any specific AI vendor.

use crate::prompt::GenerationPrompt;
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, vendor SDK).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerationService: Send + Sync {
    /// Sends one generation call and returns the provider's raw JSON text.
    ///
    /// Implementations must not retry; parsing and validation happen in the gateway.
    async fn generate_quiz_json(&self, prompt: &GenerationPrompt) -> PortResult<String>;
}
