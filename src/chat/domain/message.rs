//! The chat message aggregate.
//!
//! Messages are immutable after creation; a thread is reconstructed by
//! reading them back in `sent_at` order.

use super::{ChatDomainError, ChatMessageId};
use crate::account::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A message within a task's chat thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: ChatMessageId,
    task_id: TaskId,
    sender: UserId,
    body: String,
    sent_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedChatMessageData {
    /// Persisted message identifier.
    pub id: ChatMessageId,
    /// Persisted task the message belongs to.
    pub task_id: TaskId,
    /// Persisted sender identifier.
    pub sender: UserId,
    /// Persisted message body.
    pub body: String,
    /// Persisted send timestamp.
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a new message in a task thread.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::EmptyBody`] when the body is empty
    /// after trimming.
    pub fn new(
        task_id: TaskId,
        sender: UserId,
        body: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, ChatDomainError> {
        let text = body.into();
        if text.trim().is_empty() {
            return Err(ChatDomainError::EmptyBody);
        }
        Ok(Self {
            id: ChatMessageId::new(),
            task_id,
            sender,
            body: text,
            sent_at: clock.utc(),
        })
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedChatMessageData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            sender: data.sender,
            body: data.body,
            sent_at: data.sent_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> ChatMessageId {
        self.id
    }

    /// Returns the task this message belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the sender identifier.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the message body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the send timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}
