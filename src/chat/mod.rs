//! Per-task chat threads.
//!
//! Creators and volunteers coordinate through short message threads
//! attached to a task. Consumers poll with [`services::ChatService::messages_since`];
//! there is no push channel or delivery guarantee beyond ordered reads.
//! The module follows hexagonal architecture:
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
