//! Shared test helpers for key-value-backed integration tests.

use asar::account::{
    adapters::KvAccountRepository,
    domain::AccountProfile,
    services::AccountService,
};
use asar::chat::{adapters::KvChatRepository, services::ChatService};
use asar::config::PlatformConfig;
use asar::storage::{CollectionStore, adapters::InMemoryKeyValueStore, ports::KeyValueStore};
use asar::task::{adapters::KvTaskRepository, services::TaskLifecycleService};
use mockable::DefaultClock;
use std::sync::Arc;

/// The full service stack over one shared collection store.
pub struct Platform<S: KeyValueStore> {
    /// The shared collection store, for direct inspection.
    pub collections: Arc<CollectionStore<S>>,
    /// Registration, login, and profiles.
    pub accounts: AccountService<KvAccountRepository<S>, DefaultClock>,
    /// Task lifecycle and ledger.
    pub tasks: TaskLifecycleService<KvTaskRepository<S>, KvAccountRepository<S>, DefaultClock>,
    /// Per-task chat threads.
    pub chat: ChatService<KvChatRepository<S>, DefaultClock>,
}

/// Builds a platform over the given key-value store.
#[must_use]
pub fn platform_over<S: KeyValueStore>(store: S) -> Platform<S> {
    let collections = Arc::new(CollectionStore::new(store));
    platform_over_collections(collections)
}

/// Builds a platform over an existing collection store, simulating a
/// second client attaching to the same persisted state.
#[must_use]
pub fn platform_over_collections<S: KeyValueStore>(
    collections: Arc<CollectionStore<S>>,
) -> Platform<S> {
    let clock = Arc::new(DefaultClock);
    Platform {
        collections: Arc::clone(&collections),
        accounts: AccountService::new(
            Arc::new(KvAccountRepository::new(Arc::clone(&collections))),
            Arc::clone(&clock),
            PlatformConfig::default(),
        ),
        tasks: TaskLifecycleService::new(
            Arc::new(KvTaskRepository::new(Arc::clone(&collections))),
            Arc::new(KvAccountRepository::new(Arc::clone(&collections))),
            Arc::clone(&clock),
        ),
        chat: ChatService::new(Arc::new(KvChatRepository::new(collections)), clock),
    }
}

/// Builds a platform over a fresh in-memory key-value store.
#[must_use]
pub fn memory_platform() -> Platform<InMemoryKeyValueStore> {
    platform_over(InMemoryKeyValueStore::new())
}

/// Seeds the platform and returns the admin profile.
///
/// # Panics
///
/// Panics when seeding or the admin login fails; helpers are used from
/// tests only.
pub async fn seed_and_login_admin<S: KeyValueStore>(platform: &Platform<S>) -> AccountProfile {
    asar::bootstrap::seed(
        &platform.collections,
        &PlatformConfig::default(),
        &DefaultClock,
    )
    .expect("seeding should succeed");
    platform
        .accounts
        .login(asar::bootstrap::ADMIN_LOGIN, asar::bootstrap::ADMIN_PASSWORD)
        .await
        .expect("admin login should succeed")
}
