use std::sync::Arc;

use tracing::{info, warn};

use ft_core::identity::IdentityError;
use ft_core::ports::IdentityPort;

/// Use case for requesting a password-reset email.
pub struct RequestPasswordReset {
    identity: Arc<dyn IdentityPort>,
}

impl RequestPasswordReset {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn execute(&self, email: &str) -> Result<(), IdentityError> {
        match self.identity.reset_password(email).await {
            Ok(()) => {
                info!("password reset email requested");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "password reset request failed");
                Err(err)
            }
        }
    }
}
