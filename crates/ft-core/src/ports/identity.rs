//! Identity service port
//!
//! Contract for the hosted identity provider: account creation, sign-in and
//! sign-out, password reset, and a push-based current-identity subscription.
//! The provider's wire protocol is entirely the implementation's concern.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::identity::{Identity, IdentityError, IdentityEvent};

#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Create an account and sign it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, IdentityError>;

    /// Sign in with an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError>;

    /// Sign out the current identity.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Send a password-reset email.
    async fn reset_password(&self, email: &str) -> Result<(), IdentityError>;

    /// Subscribe to identity changes.
    ///
    /// The current identity is delivered as the first event; dropping the
    /// receiver unsubscribes.
    async fn subscribe(&self) -> mpsc::Receiver<IdentityEvent>;
}
