//! In-memory account repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::{
    domain::{UserAccount, UserId},
    ports::{AccountRepository, AccountRepositoryError, AccountRepositoryResult},
};

/// Thread-safe in-memory account repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    state: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl InMemoryAccountRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies balance writes synchronously as part of a ledger commit.
    ///
    /// Every referenced account must exist; when one is missing nothing
    /// is written.
    pub(crate) fn apply_balances(
        &self,
        accounts: &[UserAccount],
    ) -> AccountRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        for account in accounts {
            if !state.contains_key(&account.id()) {
                return Err(AccountRepositoryError::NotFound(account.id()));
            }
        }
        for account in accounts {
            state.insert(account.id(), account.clone());
        }
        Ok(())
    }
}

fn matches_identifier(account: &UserAccount, identifier: &str) -> bool {
    let normalized = identifier.trim();
    account.login().as_str().eq_ignore_ascii_case(normalized)
        || account.email().as_str().eq_ignore_ascii_case(normalized)
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn store(&self, account: &UserAccount) -> AccountRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state
            .values()
            .any(|existing| existing.login() == account.login())
        {
            return Err(AccountRepositoryError::DuplicateLogin(
                account.login().clone(),
            ));
        }
        state.insert(account.id(), account.clone());
        Ok(())
    }

    async fn update(&self, account: &UserAccount) -> AccountRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&account.id()) {
            return Err(AccountRepositoryError::NotFound(account.id()));
        }
        state.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> AccountRepositoryResult<Option<UserAccount>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> AccountRepositoryResult<Option<UserAccount>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .values()
            .find(|account| matches_identifier(account, identifier))
            .cloned())
    }

    async fn list_all(&self) -> AccountRepositoryResult<Vec<UserAccount>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.values().cloned().collect())
    }
}
