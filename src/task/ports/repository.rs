//! Repository port for task persistence with ledger-coupled commits.
//!
//! Lifecycle operations mutate a task and, usually, one or two account
//! balances. The repository accepts both in one [`LedgerCommit`] so the
//! records cannot diverge when a write fails partway.

use crate::account::domain::{UserAccount, UserId};
use crate::task::domain::{RecordVersion, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// One atomic persistence unit: a task write plus the balance writes the
/// lifecycle operation entails.
#[derive(Debug, Clone)]
pub struct LedgerCommit<'a> {
    task: &'a Task,
    expected_version: Option<RecordVersion>,
    accounts: &'a [UserAccount],
}

impl<'a> LedgerCommit<'a> {
    /// Commit inserting a brand-new task.
    #[must_use]
    pub const fn insert(task: &'a Task) -> Self {
        Self {
            task,
            expected_version: None,
            accounts: &[],
        }
    }

    /// Commit updating an existing task read at `expected_version`.
    #[must_use]
    pub const fn update(task: &'a Task, expected_version: RecordVersion) -> Self {
        Self {
            task,
            expected_version: Some(expected_version),
            accounts: &[],
        }
    }

    /// Attaches the account records whose balances this commit writes.
    #[must_use]
    pub const fn with_accounts(mut self, accounts: &'a [UserAccount]) -> Self {
        self.accounts = accounts;
        self
    }

    /// Returns the task to persist.
    #[must_use]
    pub const fn task(&self) -> &Task {
        self.task
    }

    /// Returns the version the task was read at, or `None` for inserts.
    #[must_use]
    pub const fn expected_version(&self) -> Option<RecordVersion> {
        self.expected_version
    }

    /// Returns the account records to persist alongside the task.
    #[must_use]
    pub const fn accounts(&self) -> &[UserAccount] {
        self.accounts
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Applies a ledger commit and returns the stored task, stamped with
    /// the version the write landed at.
    ///
    /// Inserts (no expected version) fail with
    /// [`TaskRepositoryError::DuplicateTask`] when the identifier is
    /// taken. Updates fail with [`TaskRepositoryError::NotFound`] when
    /// the task does not exist and
    /// [`TaskRepositoryError::VersionConflict`] when the stored record
    /// moved past the expected version — the caller lost a concurrent
    /// write race and nothing is persisted.
    ///
    /// # Errors
    ///
    /// See above; [`TaskRepositoryError::AccountMissing`] when a balance
    /// write references an unknown account, and
    /// [`TaskRepositoryError::Persistence`] for substrate failures.
    async fn commit(&self, commit: LedgerCommit<'_>) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task, ascending by creation time.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task in the given status, ascending by creation
    /// time.
    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored record moved past the expected version.
    #[error("version conflict on task {task_id}: expected {expected}, stored {actual}")]
    VersionConflict {
        /// Task the write was attempted on.
        task_id: TaskId,
        /// Version the caller read the task at.
        expected: RecordVersion,
        /// Version currently stored.
        actual: RecordVersion,
    },

    /// A balance write referenced an account that does not exist.
    #[error("account missing for balance write: {0}")]
    AccountMissing(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
