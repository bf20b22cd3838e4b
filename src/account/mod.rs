//! User accounts, credentials, and the points balance.
//!
//! Accounts fund task bounties and receive completion rewards, so every
//! balance mutation flows through the lifecycle commit in [`crate::task`];
//! this module owns registration, login, and profile management. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
