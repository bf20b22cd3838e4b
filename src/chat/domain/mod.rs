//! Domain model for per-task chat threads.

mod error;
mod ids;
mod message;

pub use error::ChatDomainError;
pub use ids::ChatMessageId;
pub use message::{ChatMessage, PersistedChatMessageData};
