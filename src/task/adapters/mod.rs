//! Adapter implementations of the task ports.

pub mod kv;
pub mod memory;

pub use kv::KvTaskRepository;
pub use memory::InMemoryTaskRepository;
