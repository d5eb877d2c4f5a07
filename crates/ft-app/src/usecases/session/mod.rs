//! Session use cases
//!
//! The session gate supervises the two asynchronous state sources and
//! decides which top-level flow is active.

pub mod gate;

pub use gate::SessionGate;
