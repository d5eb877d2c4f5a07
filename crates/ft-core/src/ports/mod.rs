//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This keeps the core business logic
//! independent of external dependencies: the durable store and the identity
//! service are injected as trait objects, never reached through globals.

pub mod errors;
pub mod identity;
pub mod key_value_store;
pub mod session_events;

pub use errors::StorageError;
pub use identity::IdentityPort;
pub use key_value_store::KeyValueStorePort;
pub use session_events::SessionEventPort;
