//! Repository port for account persistence and lookup.

use crate::account::domain::{LoginName, UserAccount, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for account repository operations.
pub type AccountRepositoryResult<T> = Result<T, AccountRepositoryError>;

/// Account persistence contract.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountRepositoryError::DuplicateLogin`] when the login
    /// name is already taken.
    async fn store(&self, account: &UserAccount) -> AccountRepositoryResult<()>;

    /// Persists changes to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountRepositoryError::NotFound`] when the account does
    /// not exist.
    async fn update(&self, account: &UserAccount) -> AccountRepositoryResult<()>;

    /// Finds an account by identifier.
    ///
    /// Returns `None` when the account does not exist.
    async fn find_by_id(&self, id: UserId) -> AccountRepositoryResult<Option<UserAccount>>;

    /// Finds an account whose login name or e-mail address matches the
    /// given identifier (case-insensitive).
    ///
    /// Returns `None` when no account matches.
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> AccountRepositoryResult<Option<UserAccount>>;

    /// Returns every stored account.
    async fn list_all(&self) -> AccountRepositoryResult<Vec<UserAccount>>;
}

/// Errors returned by account repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AccountRepositoryError {
    /// An account with the same login name already exists.
    #[error("login name already taken: {0}")]
    DuplicateLogin(LoginName),

    /// The account was not found.
    #[error("account not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccountRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
