//! Infrastructure adapters for Fit360.
//!
//! Concrete implementations of the ft-core ports: durable key-value
//! repositories and the HTTP identity client.

pub mod identity;
pub mod kv;

pub use identity::HttpIdentityClient;
pub use kv::{FileKeyValueRepository, MemoryKeyValueRepository};
