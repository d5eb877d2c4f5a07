//! Session gate event port
//!
//! Outbound notifications from the session gate to the UI layer.

use async_trait::async_trait;

use crate::identity::IdentityError;
use crate::session::SessionView;

#[async_trait]
pub trait SessionEventPort: Send + Sync {
    /// The active top-level view changed.
    async fn view_changed(&self, view: SessionView);

    /// The identity subscription reported an error; routing continues with
    /// the identity treated as signed out.
    async fn identity_error(&self, error: IdentityError);
}
