//! Error types for chat domain validation.

use thiserror::Error;

/// Errors returned while constructing chat domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatDomainError {
    /// The message body is empty after trimming.
    #[error("message body must not be empty")]
    EmptyBody,
}
