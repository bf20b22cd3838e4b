//! Service layer for task chat threads.

use crate::account::domain::UserId;
use crate::chat::{
    domain::{ChatDomainError, ChatMessage},
    ports::{ChatRepository, ChatRepositoryError},
};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for chat operations.
#[derive(Debug, Error)]
pub enum ChatServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ChatDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ChatRepositoryError),
}

/// Result type for chat service operations.
pub type ChatServiceResult<T> = Result<T, ChatServiceError>;

/// Chat thread orchestration service.
#[derive(Clone)]
pub struct ChatService<R, C>
where
    R: ChatRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ChatService<R, C>
where
    R: ChatRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new chat service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Sends a message into a task's thread.
    ///
    /// # Errors
    ///
    /// Returns [`ChatServiceError::Domain`] when the body is empty, or
    /// [`ChatServiceError::Repository`] when persistence fails.
    pub async fn send(
        &self,
        task_id: TaskId,
        sender: UserId,
        body: impl Into<String> + Send,
    ) -> ChatServiceResult<ChatMessage> {
        let message = ChatMessage::new(task_id, sender, body, &*self.clock)?;
        self.repository.append(&message).await?;
        Ok(message)
    }

    /// Returns a task's full thread, ascending by send time.
    ///
    /// # Errors
    ///
    /// Returns [`ChatServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn thread(&self, task_id: TaskId) -> ChatServiceResult<Vec<ChatMessage>> {
        Ok(self.repository.list_for_task(task_id).await?)
    }

    /// Returns the messages sent strictly after `after`.
    ///
    /// Callers poll by passing the send time of the last message they
    /// have seen.
    ///
    /// # Errors
    ///
    /// Returns [`ChatServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn messages_since(
        &self,
        task_id: TaskId,
        after: DateTime<Utc>,
    ) -> ChatServiceResult<Vec<ChatMessage>> {
        Ok(self.repository.list_since(task_id, after).await?)
    }
}
