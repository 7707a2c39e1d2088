//! Domain error model.

use thiserror::Error;

/// Result type used across the document layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Document-level error.
///
/// Only raised when a caller builds documents from untrusted text. The
/// validation hooks themselves never produce it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The payload was not valid JSON.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The payload parsed, but is not a JSON object.
    #[error("document must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl DomainError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
