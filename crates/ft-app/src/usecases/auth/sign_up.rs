use std::sync::Arc;

use tracing::{info, warn};

use ft_core::identity::{Identity, IdentityError};
use ft_core::ports::IdentityPort;

/// Use case for creating an account.
pub struct SignUp {
    identity: Arc<dyn IdentityPort>,
}

impl SignUp {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    /// Create an account and sign it in.
    pub async fn execute(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        match self.identity.sign_up(email, password).await {
            Ok(identity) => {
                info!(uid = %identity.uid, "account created");
                Ok(identity)
            }
            Err(err) => {
                warn!(error = %err, "sign-up failed");
                Err(err)
            }
        }
    }
}
