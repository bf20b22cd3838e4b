//! User account aggregate root.

use super::{
    AccountDomainError, EmailAddress, LoginName, ParseRoleError, PasswordHash, PointsBalance,
    UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Moderates pending tasks and reviews completion reports.
    Admin,
    /// Posts and fulfils tasks.
    User,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// User account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    id: UserId,
    login: LoginName,
    display_name: String,
    email: EmailAddress,
    password: PasswordHash,
    role: Role,
    balance: PointsBalance,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted account aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAccountData {
    /// Persisted account identifier.
    pub id: UserId,
    /// Persisted login name.
    pub login: LoginName,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted e-mail address.
    pub email: EmailAddress,
    /// Persisted password digest.
    pub password: PasswordHash,
    /// Persisted role.
    pub role: Role,
    /// Persisted points balance.
    pub balance: PointsBalance,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Password-free projection of an account, safe to hand to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountProfile {
    /// Account identifier.
    pub id: UserId,
    /// Login name.
    pub login: LoginName,
    /// Display name.
    pub display_name: String,
    /// E-mail address.
    pub email: EmailAddress,
    /// Platform role.
    pub role: Role,
    /// Current points balance.
    pub balance: PointsBalance,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates a new account.
    #[must_use]
    pub fn new(
        login: LoginName,
        display_name: String,
        email: EmailAddress,
        password: PasswordHash,
        role: Role,
        balance: PointsBalance,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            login,
            display_name,
            email,
            password,
            role,
            balance,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAccountData) -> Self {
        Self {
            id: data.id,
            login: data.login,
            display_name: data.display_name,
            email: data.email,
            password: data.password,
            role: data.role,
            balance: data.balance,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub const fn login(&self) -> &LoginName {
        &self.login
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the e-mail address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the platform role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the current points balance.
    #[must_use]
    pub const fn balance(&self) -> PointsBalance {
        self.balance
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the candidate password matches the stored digest.
    #[must_use]
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    /// Debits the balance by exactly `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InsufficientPoints`] when the
    /// balance cannot fund the amount; the balance is left untouched.
    pub fn fund(&mut self, amount: u32, clock: &impl Clock) -> Result<(), AccountDomainError> {
        if !self.balance.can_afford(amount) {
            return Err(AccountDomainError::InsufficientPoints {
                required: amount,
                available: self.balance.points(),
            });
        }
        self.balance = self.balance.debited_clamped(amount);
        self.touch(clock);
        Ok(())
    }

    /// Credits the balance by `amount`.
    pub fn credit(&mut self, amount: u32, clock: &impl Clock) {
        self.balance = self.balance.credited(amount);
        self.touch(clock);
    }

    /// Debits the balance by up to `amount`, clamping at zero.
    pub fn debit_clamped(&mut self, amount: u32, clock: &impl Clock) {
        self.balance = self.balance.debited_clamped(amount);
        self.touch(clock);
    }

    /// Updates display name and/or e-mail address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyDisplayName`] when the new
    /// display name is empty after trimming.
    pub fn update_profile(
        &mut self,
        display_name: Option<String>,
        email: Option<EmailAddress>,
        clock: &impl Clock,
    ) -> Result<(), AccountDomainError> {
        if let Some(name) = display_name {
            if name.trim().is_empty() {
                return Err(AccountDomainError::EmptyDisplayName);
            }
            self.display_name = name;
        }
        if let Some(address) = email {
            self.email = address;
        }
        self.touch(clock);
        Ok(())
    }

    /// Returns the password-free projection of this account.
    #[must_use]
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            login: self.login.clone(),
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            role: self.role,
            balance: self.balance,
            created_at: self.created_at,
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
