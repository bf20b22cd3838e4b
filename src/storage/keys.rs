//! Collection keys for the persisted platform state.
//!
//! Four logical collections make up the durable state: user accounts,
//! tasks, chat messages, and the first-run initialisation flag.

/// User account collection.
pub const USERS: &str = "asar.users";

/// Task collection.
pub const TASKS: &str = "asar.tasks";

/// Chat message collection.
pub const CHAT_MESSAGES: &str = "asar.chat_messages";

/// First-run seeding flag.
pub const INITIALIZED: &str = "asar.initialized";
