//! Port contracts for the account module.

mod repository;

pub use repository::{AccountRepository, AccountRepositoryError, AccountRepositoryResult};
