//! In-memory task repository for lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::{adapters::InMemoryAccountRepository, ports::AccountRepositoryError};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{LedgerCommit, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Shares the in-memory account store so ledger commits apply the task
/// write and its balance writes together.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
    accounts: InMemoryAccountRepository,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository sharing the given account store.
    #[must_use]
    pub fn new(accounts: InMemoryAccountRepository) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            accounts,
        }
    }

    fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
        tasks
    }
}

fn map_account_error(err: AccountRepositoryError) -> TaskRepositoryError {
    match err {
        AccountRepositoryError::NotFound(user) => TaskRepositoryError::AccountMissing(user),
        other => TaskRepositoryError::persistence(other),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn commit(&self, commit: LedgerCommit<'_>) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let task_id = commit.task().id();
        let stored = match commit.expected_version() {
            None => {
                if state.contains_key(&task_id) {
                    return Err(TaskRepositoryError::DuplicateTask(task_id));
                }
                commit.task().clone()
            }
            Some(expected) => {
                let current = state
                    .get(&task_id)
                    .ok_or(TaskRepositoryError::NotFound(task_id))?;
                if current.version() != expected {
                    return Err(TaskRepositoryError::VersionConflict {
                        task_id,
                        expected,
                        actual: current.version(),
                    });
                }
                commit.task().clone().with_version(expected.next())
            }
        };

        // Balance writes go first so a missing account leaves the task
        // untouched; apply_balances itself validates before writing.
        self.accounts
            .apply_balances(commit.accounts())
            .map_err(map_account_error)?;

        state.insert(task_id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(state.values().cloned().collect()))
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(
            state
                .values()
                .filter(|task| task.status() == status)
                .cloned()
                .collect(),
        ))
    }
}
