use std::sync::Arc;

use tracing::{info, warn};

use ft_core::identity::{Identity, IdentityError};
use ft_core::ports::IdentityPort;

/// Use case for signing in with an existing account.
pub struct SignIn {
    identity: Arc<dyn IdentityPort>,
}

impl SignIn {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        match self.identity.sign_in(email, password).await {
            Ok(identity) => {
                info!(uid = %identity.uid, "signed in");
                Ok(identity)
            }
            Err(err) => {
                warn!(error = %err, "sign-in failed");
                Err(err)
            }
        }
    }
}
