//! Key-value-backed chat repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::chat::{
    domain::ChatMessage,
    ports::{ChatRepository, ChatRepositoryError, ChatRepositoryResult},
};
use crate::storage::{CollectionStore, keys, ports::KeyValueStore};
use crate::task::domain::TaskId;

/// Chat repository persisting to the shared collection store.
#[derive(Debug)]
pub struct KvChatRepository<S> {
    collections: Arc<CollectionStore<S>>,
}

impl<S: KeyValueStore> KvChatRepository<S> {
    /// Creates a repository over the shared collection store.
    #[must_use]
    pub fn new(collections: Arc<CollectionStore<S>>) -> Self {
        Self { collections }
    }

    fn load_all(&self) -> ChatRepositoryResult<Vec<ChatMessage>> {
        self.collections
            .load(keys::CHAT_MESSAGES)
            .map_err(ChatRepositoryError::persistence)
    }
}

fn sorted(mut messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    messages.sort_by_key(|message| (message.sent_at(), message.id().into_inner()));
    messages
}

#[async_trait]
impl<S: KeyValueStore> ChatRepository for KvChatRepository<S> {
    async fn append(&self, message: &ChatMessage) -> ChatRepositoryResult<()> {
        let _guard = self
            .collections
            .exclusive()
            .map_err(ChatRepositoryError::persistence)?;
        let mut messages = self.load_all()?;
        messages.push(message.clone());
        self.collections
            .save(keys::CHAT_MESSAGES, &messages)
            .map_err(ChatRepositoryError::persistence)
    }

    async fn list_for_task(&self, task_id: TaskId) -> ChatRepositoryResult<Vec<ChatMessage>> {
        let messages = self.load_all()?;
        Ok(sorted(
            messages
                .into_iter()
                .filter(|message| message.task_id() == task_id)
                .collect(),
        ))
    }

    async fn list_since(
        &self,
        task_id: TaskId,
        after: DateTime<Utc>,
    ) -> ChatRepositoryResult<Vec<ChatMessage>> {
        let messages = self.load_all()?;
        Ok(sorted(
            messages
                .into_iter()
                .filter(|message| message.task_id() == task_id && message.sent_at() > after)
                .collect(),
        ))
    }
}
