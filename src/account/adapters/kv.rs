//! Key-value-backed account repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::account::{
    domain::{UserAccount, UserId},
    ports::{AccountRepository, AccountRepositoryError, AccountRepositoryResult},
};
use crate::storage::{CollectionStore, keys, ports::KeyValueStore};

/// Account repository persisting to the shared collection store.
#[derive(Debug)]
pub struct KvAccountRepository<S> {
    collections: Arc<CollectionStore<S>>,
}

impl<S: KeyValueStore> KvAccountRepository<S> {
    /// Creates a repository over the shared collection store.
    #[must_use]
    pub fn new(collections: Arc<CollectionStore<S>>) -> Self {
        Self { collections }
    }

    fn load_all(&self) -> AccountRepositoryResult<Vec<UserAccount>> {
        self.collections
            .load(keys::USERS)
            .map_err(AccountRepositoryError::persistence)
    }

    fn save_all(&self, accounts: &[UserAccount]) -> AccountRepositoryResult<()> {
        self.collections
            .save(keys::USERS, accounts)
            .map_err(AccountRepositoryError::persistence)
    }
}

fn matches_identifier(account: &UserAccount, identifier: &str) -> bool {
    let normalized = identifier.trim();
    account.login().as_str().eq_ignore_ascii_case(normalized)
        || account.email().as_str().eq_ignore_ascii_case(normalized)
}

#[async_trait]
impl<S: KeyValueStore> AccountRepository for KvAccountRepository<S> {
    async fn store(&self, account: &UserAccount) -> AccountRepositoryResult<()> {
        let _guard = self
            .collections
            .exclusive()
            .map_err(AccountRepositoryError::persistence)?;
        let mut accounts = self.load_all()?;
        if accounts
            .iter()
            .any(|existing| existing.login() == account.login())
        {
            return Err(AccountRepositoryError::DuplicateLogin(
                account.login().clone(),
            ));
        }
        accounts.push(account.clone());
        self.save_all(&accounts)
    }

    async fn update(&self, account: &UserAccount) -> AccountRepositoryResult<()> {
        let _guard = self
            .collections
            .exclusive()
            .map_err(AccountRepositoryError::persistence)?;
        let mut accounts = self.load_all()?;
        let slot = accounts
            .iter_mut()
            .find(|existing| existing.id() == account.id())
            .ok_or(AccountRepositoryError::NotFound(account.id()))?;
        *slot = account.clone();
        self.save_all(&accounts)
    }

    async fn find_by_id(&self, id: UserId) -> AccountRepositoryResult<Option<UserAccount>> {
        let accounts = self.load_all()?;
        Ok(accounts.into_iter().find(|account| account.id() == id))
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> AccountRepositoryResult<Option<UserAccount>> {
        let accounts = self.load_all()?;
        Ok(accounts
            .into_iter()
            .find(|account| matches_identifier(account, identifier)))
    }

    async fn list_all(&self) -> AccountRepositoryResult<Vec<UserAccount>> {
        self.load_all()
    }
}
