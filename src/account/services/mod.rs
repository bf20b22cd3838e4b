//! Orchestration services for the account module.

mod directory;

pub use directory::{
    AccountService, AccountServiceError, AccountServiceResult, RegisterAccountRequest,
    UpdateProfileRequest,
};
