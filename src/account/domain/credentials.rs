//! Validated credential value types.

use super::AccountDomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Normalised unique login name.
///
/// Login names are lowercased on construction so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginName(String);

impl LoginName {
    /// Creates a validated login name.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InvalidLoginName`] when the value is
    /// empty after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(AccountDomainError::InvalidLoginName(raw));
        }
        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Returns the login name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LoginName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LoginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated e-mail address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InvalidEmailAddress`] when the value
    /// does not contain exactly one `@` with non-empty local and domain
    /// parts.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && !has_more_parts
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(AccountDomainError::InvalidEmailAddress(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Salted SHA-256 password digest.
///
/// The cleartext password is never stored; verification re-derives the
/// digest from the stored salt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    salt: String,
    digest: String,
}

impl PasswordHash {
    /// Derives a hash for the given password with a fresh random salt.
    #[must_use]
    pub fn derive(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = digest_hex(&salt, password);
        Self { salt, digest }
    }

    /// Returns whether the candidate password matches this hash.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        digest_hex(&self.salt, candidate) == self.digest
    }
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
