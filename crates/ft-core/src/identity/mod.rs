//! Identity domain models
//!
//! Types describing the authenticated user record returned by the hosted
//! identity service, the classified failures it can report, and the events
//! delivered by its change subscription.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An authenticated user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned unique id.
    pub uid: String,
    /// Email address the account was created with.
    pub email: String,
    /// Whether the email address has been verified.
    pub email_verified: bool,
}

/// Classified identity service failures.
///
/// Surfaced to the UI as a user-facing message; never fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("email is already in use")]
    EmailInUse,
    #[error("email address is invalid")]
    InvalidEmail,
    #[error("password is too weak")]
    WeakPassword,
    #[error("no account exists for this email")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("too many attempts, try again later")]
    TooManyRequests,
    #[error("identity service unreachable: {0}")]
    Network(String),
    #[error("identity service failed: {0}")]
    Unknown(String),
}

/// Push notification delivered by the identity change subscription.
#[derive(Debug, Clone)]
pub enum IdentityEvent {
    /// The current identity changed. `None` means signed out.
    Changed(Option<Identity>),
    /// The subscription itself reported an error.
    Error(IdentityError),
}
