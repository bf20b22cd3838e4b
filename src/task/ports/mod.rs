//! Port contracts for the task module.

mod repository;

pub use repository::{LedgerCommit, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
