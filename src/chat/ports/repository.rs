//! Repository port for chat message persistence and retrieval.

use crate::chat::domain::ChatMessage;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for chat repository operations.
pub type ChatRepositoryResult<T> = Result<T, ChatRepositoryError>;

/// Chat message persistence contract.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Appends a message to its task's thread.
    async fn append(&self, message: &ChatMessage) -> ChatRepositoryResult<()>;

    /// Returns a task's thread, ascending by send time.
    async fn list_for_task(&self, task_id: TaskId) -> ChatRepositoryResult<Vec<ChatMessage>>;

    /// Returns a task's messages sent strictly after `after`, ascending
    /// by send time. This is the polling read.
    async fn list_since(
        &self,
        task_id: TaskId,
        after: DateTime<Utc>,
    ) -> ChatRepositoryResult<Vec<ChatMessage>>;
}

/// Errors returned by chat repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ChatRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChatRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
