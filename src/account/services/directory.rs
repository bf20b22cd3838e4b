//! Service layer for registration, login, and profile management.

use crate::account::{
    domain::{
        AccountDomainError, AccountProfile, EmailAddress, LoginName, PasswordHash, PointsBalance,
        Role, UserAccount, UserId,
    },
    ports::{AccountRepository, AccountRepositoryError},
};
use crate::config::PlatformConfig;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAccountRequest {
    login: String,
    display_name: String,
    email: String,
    password: String,
}

impl RegisterAccountRequest {
    /// Creates a request with the required registration fields.
    #[must_use]
    pub fn new(
        login: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            display_name: display_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Request payload for updating profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    display_name: Option<String>,
    email: Option<String>,
}

impl UpdateProfileRequest {
    /// Creates an empty update.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            display_name: None,
            email: None,
        }
    }

    /// Sets a new display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets a new e-mail address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AccountRepositoryError),
    /// Login or password did not match any account.
    #[error("invalid login or password")]
    InvalidCredentials,
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Registration, login, and profile orchestration service.
#[derive(Clone)]
pub struct AccountService<R, C>
where
    R: AccountRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: PlatformConfig,
}

impl<R, C> AccountService<R, C>
where
    R: AccountRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, config: PlatformConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Registers a new account with the configured starting balance.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when a field fails
    /// validation, or [`AccountServiceError::Repository`] when the login
    /// is taken or persistence fails.
    pub async fn register(
        &self,
        request: RegisterAccountRequest,
    ) -> AccountServiceResult<AccountProfile> {
        let RegisterAccountRequest {
            login,
            display_name,
            email,
            password,
        } = request;

        if display_name.trim().is_empty() {
            return Err(AccountDomainError::EmptyDisplayName.into());
        }
        let login_name = LoginName::new(login)?;
        let email_address = EmailAddress::new(email)?;
        let account = UserAccount::new(
            login_name,
            display_name,
            email_address,
            PasswordHash::derive(&password),
            Role::User,
            PointsBalance::new(self.config.starting_balance),
            &*self.clock,
        );
        self.repository.store(&account).await?;
        tracing::info!(user = %account.id(), login = %account.login(), "account registered");
        Ok(account.profile())
    }

    /// Authenticates by login name or e-mail address.
    ///
    /// Returns the password-free profile on success. Unknown identifiers
    /// and wrong passwords are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::InvalidCredentials`] when the
    /// identifier or password does not match, or
    /// [`AccountServiceError::Repository`] when persistence fails.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> AccountServiceResult<AccountProfile> {
        let Some(account) = self.repository.find_by_identifier(identifier).await? else {
            tracing::debug!(identifier, "login rejected: unknown identifier");
            return Err(AccountServiceError::InvalidCredentials);
        };
        if !account.verify_password(password) {
            tracing::debug!(user = %account.id(), "login rejected: password mismatch");
            return Err(AccountServiceError::InvalidCredentials);
        }
        Ok(account.profile())
    }

    /// Returns the profile of the given account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when the account does
    /// not exist or persistence fails.
    pub async fn profile(&self, id: UserId) -> AccountServiceResult<AccountProfile> {
        let account = self.find_by_id_or_error(id).await?;
        Ok(account.profile())
    }

    /// Returns the profiles of every account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn profiles(&self) -> AccountServiceResult<Vec<AccountProfile>> {
        let accounts = self.repository.list_all().await?;
        Ok(accounts.iter().map(UserAccount::profile).collect())
    }

    /// Updates display name and/or e-mail address of an account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when a field fails
    /// validation, or [`AccountServiceError::Repository`] when the
    /// account does not exist or persistence fails.
    pub async fn update_profile(
        &self,
        id: UserId,
        request: UpdateProfileRequest,
    ) -> AccountServiceResult<AccountProfile> {
        let UpdateProfileRequest {
            display_name,
            email,
        } = request;
        let email_address = email.map(EmailAddress::new).transpose()?;

        let mut account = self.find_by_id_or_error(id).await?;
        account.update_profile(display_name, email_address, &*self.clock)?;
        self.repository.update(&account).await?;
        Ok(account.profile())
    }

    async fn find_by_id_or_error(&self, id: UserId) -> AccountServiceResult<UserAccount> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountRepositoryError::NotFound(id).into())
    }
}
