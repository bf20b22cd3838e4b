//! First-run seeding of the platform collections.
//!
//! Seeds a default administrator and two demonstration accounts, plus a
//! handful of demonstration tasks on the very first run. Accounts are
//! only inserted when their login is missing; existing records and
//! user-created tasks are never overwritten.

use crate::account::domain::{
    AccountDomainError, EmailAddress, LoginName, PasswordHash, PointsBalance, Role, UserAccount,
};
use crate::config::PlatformConfig;
use crate::geo::city_coordinates;
use crate::storage::{
    CollectionStore, keys,
    ports::{KeyValueStore, StorageError},
};
use crate::task::domain::{
    PersistedTaskData, PointValue, RecordVersion, Task, TaskDomainError, TaskId, TaskStatus,
};
use chrono::Duration;
use mockable::Clock;
use thiserror::Error;

/// Login name of the seeded administrator.
pub const ADMIN_LOGIN: &str = "admin";

/// Password of the seeded administrator.
pub const ADMIN_PASSWORD: &str = "admin";

/// Password shared by the demonstration accounts.
pub const DEMO_PASSWORD: &str = "demo";

/// Errors returned while seeding.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The storage substrate failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A seeded account value failed validation.
    #[error(transparent)]
    Account(#[from] AccountDomainError),
    /// A seeded task value failed validation.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
}

/// Summary of what a seeding pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Whether this was the first run against the store.
    pub first_run: bool,
    /// Default accounts inserted because their login was missing.
    pub accounts_inserted: usize,
    /// Demonstration tasks written on the first run.
    pub tasks_seeded: usize,
}

/// Seeds the collections behind the given store.
///
/// Safe to call on every start: defaults are only inserted when missing
/// and demonstration tasks are only written on the first run.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the store fails or a seeded value is
/// rejected by domain validation.
pub fn seed<S, C>(
    collections: &CollectionStore<S>,
    config: &PlatformConfig,
    clock: &C,
) -> Result<SeedReport, BootstrapError>
where
    S: KeyValueStore,
    C: Clock,
{
    let _guard = collections.exclusive()?;

    let first_run = !collections.flag(keys::INITIALIZED)?;
    let mut accounts: Vec<UserAccount> = collections.load(keys::USERS)?;

    let mut accounts_inserted = 0;
    for account in default_accounts(config, clock)? {
        let taken = accounts
            .iter()
            .any(|existing| existing.login() == account.login());
        if !taken {
            accounts.push(account);
            accounts_inserted += 1;
        }
    }
    collections.save(keys::USERS, &accounts)?;

    let mut tasks_seeded = 0;
    if first_run && config.seed_demo_data {
        let mut tasks: Vec<Task> = collections.load(keys::TASKS)?;
        if tasks.is_empty() {
            tasks = demo_tasks(&accounts, clock)?;
            tasks_seeded = tasks.len();
            collections.save(keys::TASKS, &tasks)?;
        }
    }

    collections.set_flag(keys::INITIALIZED)?;
    tracing::info!(first_run, accounts_inserted, tasks_seeded, "seeding pass finished");
    Ok(SeedReport {
        first_run,
        accounts_inserted,
        tasks_seeded,
    })
}

fn default_accounts<C: Clock>(
    config: &PlatformConfig,
    clock: &C,
) -> Result<Vec<UserAccount>, BootstrapError> {
    let admin = UserAccount::new(
        LoginName::new(ADMIN_LOGIN)?,
        "Administrator".to_owned(),
        EmailAddress::new("admin@asar.dev")?,
        PasswordHash::derive(ADMIN_PASSWORD),
        Role::Admin,
        PointsBalance::ZERO,
        clock,
    );
    let aigerim = UserAccount::new(
        LoginName::new("aigerim")?,
        "Aigerim Seitova".to_owned(),
        EmailAddress::new("aigerim@asar.dev")?,
        PasswordHash::derive(DEMO_PASSWORD),
        Role::User,
        PointsBalance::new(config.starting_balance),
        clock,
    );
    let daniyar = UserAccount::new(
        LoginName::new("daniyar")?,
        "Daniyar Omarov".to_owned(),
        EmailAddress::new("daniyar@asar.dev")?,
        PasswordHash::derive(DEMO_PASSWORD),
        Role::User,
        PointsBalance::new(config.starting_balance),
        clock,
    );
    Ok(vec![admin, aigerim, daniyar])
}

/// Builds the demonstration tasks: two open requests, one awaiting
/// moderation, and one already completed by the second demo account.
fn demo_tasks<C: Clock>(
    accounts: &[UserAccount],
    clock: &C,
) -> Result<Vec<Task>, BootstrapError> {
    let creator = accounts
        .iter()
        .find(|account| account.login().as_str() == "aigerim");
    let assignee = accounts
        .iter()
        .find(|account| account.login().as_str() == "daniyar");
    let (Some(creator), Some(assignee)) = (creator, assignee) else {
        return Ok(Vec::new());
    };

    let now = clock.utc();
    let entries = [
        (
            "Help tidying a flat",
            "An elderly neighbour needs a hand with a deep clean of her flat.",
            "Almaty",
            50,
            TaskStatus::Open,
            None,
            Duration::days(2),
        ),
        (
            "Grocery delivery",
            "Groceries need carrying to the third floor; the lift is out of order.",
            "Astana",
            30,
            TaskStatus::Pending,
            None,
            Duration::days(1),
        ),
        (
            "Small repairs",
            "Two shelves to mount and a dripping tap to fix.",
            "Shymkent",
            75,
            TaskStatus::Done,
            Some(assignee.id()),
            Duration::days(5),
        ),
        (
            "Dog walking",
            "Daily walk for a calm labrador while the owner recovers.",
            "Almaty",
            25,
            TaskStatus::Open,
            None,
            Duration::hours(1),
        ),
    ];

    let mut tasks = Vec::with_capacity(entries.len());
    for (title, description, city, bounty, status, assigned_to, age) in entries {
        let created_at = now - age;
        tasks.push(Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            title: title.to_owned(),
            description: description.to_owned(),
            city: crate::task::domain::CityName::new(city)?,
            location: city_coordinates(city),
            status,
            created_by: creator.id(),
            assigned_to,
            bounty: PointValue::new(bounty)?,
            report: None,
            created_at,
            updated_at: created_at,
            version: RecordVersion::initial(),
        }));
    }
    Ok(tasks)
}
