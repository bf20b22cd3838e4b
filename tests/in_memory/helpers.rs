//! Shared test helpers for in-memory service integration tests.

use asar::account::{
    adapters::InMemoryAccountRepository,
    domain::AccountProfile,
    services::{AccountService, RegisterAccountRequest},
};
use asar::chat::{adapters::InMemoryChatRepository, services::ChatService};
use asar::config::PlatformConfig;
use asar::task::{
    adapters::InMemoryTaskRepository,
    domain::Task,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use std::sync::Arc;

/// The full in-memory service stack under test.
pub struct Platform {
    /// Registration, login, and profiles.
    pub accounts: AccountService<InMemoryAccountRepository, DefaultClock>,
    /// Task lifecycle and ledger.
    pub tasks: TaskLifecycleService<InMemoryTaskRepository, InMemoryAccountRepository, DefaultClock>,
    /// Per-task chat threads.
    pub chat: ChatService<InMemoryChatRepository, DefaultClock>,
}

/// Builds a platform whose services share one in-memory account store.
#[must_use]
pub fn platform() -> Platform {
    let clock = Arc::new(DefaultClock);
    let account_repository = InMemoryAccountRepository::new();
    let task_repository = InMemoryTaskRepository::new(account_repository.clone());
    let chat_repository = InMemoryChatRepository::new();

    Platform {
        accounts: AccountService::new(
            Arc::new(account_repository.clone()),
            Arc::clone(&clock),
            PlatformConfig::default(),
        ),
        tasks: TaskLifecycleService::new(
            Arc::new(task_repository),
            Arc::new(account_repository),
            Arc::clone(&clock),
        ),
        chat: ChatService::new(Arc::new(chat_repository), clock),
    }
}

/// Registers an account with the default starting balance.
///
/// # Panics
///
/// Panics when registration fails; helpers are used from tests only.
pub async fn register(platform: &Platform, login: &str) -> AccountProfile {
    platform
        .accounts
        .register(RegisterAccountRequest::new(
            login,
            format!("{login} display"),
            format!("{login}@asar.dev"),
            "secret",
        ))
        .await
        .expect("registration should succeed")
}

/// Posts a bounty-funded task in Almaty.
///
/// # Panics
///
/// Panics when creation fails; helpers are used from tests only.
pub async fn post_task(platform: &Platform, creator: &AccountProfile, bounty: u32) -> Task {
    platform
        .tasks
        .create_task(CreateTaskRequest::new(
            "Help tidying a flat",
            "A neighbour needs a hand with cleaning.",
            "Almaty",
            creator.id,
            bounty,
        ))
        .await
        .expect("task creation should succeed")
}

/// Reads the current points balance of an account.
///
/// # Panics
///
/// Panics when the profile lookup fails; helpers are used from tests
/// only.
pub async fn balance_of(platform: &Platform, profile: &AccountProfile) -> u32 {
    platform
        .accounts
        .profile(profile.id)
        .await
        .expect("profile lookup should succeed")
        .balance
        .points()
}
