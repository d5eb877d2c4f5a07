use std::sync::Arc;

use tracing::{info, warn};

use ft_core::identity::IdentityError;
use ft_core::ports::IdentityPort;

/// Use case for signing out the current identity.
pub struct SignOut {
    identity: Arc<dyn IdentityPort>,
}

impl SignOut {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn execute(&self) -> Result<(), IdentityError> {
        match self.identity.sign_out().await {
            Ok(()) => {
                info!("signed out");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "sign-out failed");
                Err(err)
            }
        }
    }
}
