//! Port contracts for the chat module.

mod repository;

pub use repository::{ChatRepository, ChatRepositoryError, ChatRepositoryResult};
