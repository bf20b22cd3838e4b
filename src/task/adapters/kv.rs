//! Key-value-backed task repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::account::domain::UserAccount;
use crate::storage::{CollectionStore, keys, ports::KeyValueStore};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{LedgerCommit, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Task repository persisting to the shared collection store.
///
/// Ledger commits hold the store-wide exclusive section while writing the
/// account collection and then the task collection, so concurrent
/// lifecycle operations in the same process serialise and the claim CAS
/// stays sound.
#[derive(Debug)]
pub struct KvTaskRepository<S> {
    collections: Arc<CollectionStore<S>>,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    /// Creates a repository over the shared collection store.
    #[must_use]
    pub fn new(collections: Arc<CollectionStore<S>>) -> Self {
        Self { collections }
    }

    fn load_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.collections
            .load(keys::TASKS)
            .map_err(TaskRepositoryError::persistence)
    }

    fn save_tasks(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        self.collections
            .save(keys::TASKS, tasks)
            .map_err(TaskRepositoryError::persistence)
    }

    fn apply_balances(&self, accounts: &[UserAccount]) -> TaskRepositoryResult<()> {
        if accounts.is_empty() {
            return Ok(());
        }
        let mut stored: Vec<UserAccount> = self
            .collections
            .load(keys::USERS)
            .map_err(TaskRepositoryError::persistence)?;
        for account in accounts {
            let slot = stored
                .iter_mut()
                .find(|existing| existing.id() == account.id())
                .ok_or(TaskRepositoryError::AccountMissing(account.id()))?;
            *slot = account.clone();
        }
        self.collections
            .save(keys::USERS, &stored)
            .map_err(TaskRepositoryError::persistence)
    }

    fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
        tasks
    }
}

#[async_trait]
impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    async fn commit(&self, commit: LedgerCommit<'_>) -> TaskRepositoryResult<Task> {
        let _guard = self
            .collections
            .exclusive()
            .map_err(TaskRepositoryError::persistence)?;

        let mut tasks = self.load_tasks()?;
        let task_id = commit.task().id();
        let position = tasks.iter().position(|task| task.id() == task_id);

        let stored = match (commit.expected_version(), position) {
            (None, Some(_)) => return Err(TaskRepositoryError::DuplicateTask(task_id)),
            (None, None) => commit.task().clone(),
            (Some(_), None) => return Err(TaskRepositoryError::NotFound(task_id)),
            (Some(expected), Some(index)) => {
                let actual = tasks
                    .get(index)
                    .map(Task::version)
                    .ok_or(TaskRepositoryError::NotFound(task_id))?;
                if actual != expected {
                    return Err(TaskRepositoryError::VersionConflict {
                        task_id,
                        expected,
                        actual,
                    });
                }
                commit.task().clone().with_version(expected.next())
            }
        };

        // Balance writes first; the task write is the commit point.
        self.apply_balances(commit.accounts())?;
        match position {
            Some(index) => {
                if let Some(slot) = tasks.get_mut(index) {
                    *slot = stored.clone();
                }
            }
            None => tasks.push(stored.clone()),
        }
        self.save_tasks(&tasks)?;
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.load_tasks()?;
        Ok(tasks.into_iter().find(|task| task.id() == id))
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        Ok(Self::sorted(self.load_tasks()?))
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.load_tasks()?;
        Ok(Self::sorted(
            tasks
                .into_iter()
                .filter(|task| task.status() == status)
                .collect(),
        ))
    }
}
