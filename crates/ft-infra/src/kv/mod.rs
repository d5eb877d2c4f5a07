//! Durable key-value store adapters.

pub mod file_repo;
pub mod memory;

pub use file_repo::FileKeyValueRepository;
pub use memory::MemoryKeyValueRepository;
