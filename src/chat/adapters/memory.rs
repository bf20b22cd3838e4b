//! In-memory chat repository for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::chat::{
    domain::ChatMessage,
    ports::{ChatRepository, ChatRepositoryError, ChatRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory chat repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatRepository {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl InMemoryChatRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    messages.sort_by_key(|message| (message.sent_at(), message.id().into_inner()));
    messages
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn append(&self, message: &ChatMessage) -> ChatRepositoryResult<()> {
        let mut messages = self.messages.write().map_err(|err| {
            ChatRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        messages.push(message.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> ChatRepositoryResult<Vec<ChatMessage>> {
        let messages = self.messages.read().map_err(|err| {
            ChatRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(sorted(
            messages
                .iter()
                .filter(|message| message.task_id() == task_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_since(
        &self,
        task_id: TaskId,
        after: DateTime<Utc>,
    ) -> ChatRepositoryResult<Vec<ChatMessage>> {
        let messages = self.messages.read().map_err(|err| {
            ChatRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(sorted(
            messages
                .iter()
                .filter(|message| message.task_id() == task_id && message.sent_at() > after)
                .cloned()
                .collect(),
        ))
    }
}
