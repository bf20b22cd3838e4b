//! Adapter implementations of the account ports.

pub mod kv;
pub mod memory;

pub use kv::KvAccountRepository;
pub use memory::InMemoryAccountRepository;
