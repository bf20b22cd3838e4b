//! Error types for account domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating account domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The login name is empty or contains whitespace.
    #[error("invalid login name '{0}', expected a non-empty name without whitespace")]
    InvalidLoginName(String),

    /// The e-mail address is not of the `local@domain` form.
    #[error("invalid e-mail address '{0}'")]
    InvalidEmailAddress(String),

    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The account balance cannot fund the requested amount.
    #[error("insufficient points: {required} required, {available} available")]
    InsufficientPoints {
        /// Points the operation requires.
        required: u32,
        /// Points currently available.
        available: u32,
    },
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
