//! Task lifecycle management for asar.
//!
//! Tasks are help requests funded with points. They move through an
//! explicit state machine (moderation, claiming, report review) and every
//! lifecycle commit carries the balance writes it entails, so a task
//! write and its points mutations land as one persistence unit. The
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
