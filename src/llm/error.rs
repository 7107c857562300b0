//! Error types for reply generation

use thiserror::Error;

/// Errors raised while producing an assistant reply
#[derive(Debug, Error)]
pub enum LlmError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
