//! HTTP identity client
//!
//! Implements the IdentityPort against the hosted identity provider's
//! account REST endpoints. The client tracks the current identity in memory
//! and broadcasts every change to subscribers, so the session gate sees
//! sign-up, sign-in and sign-out as they happen.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::{mpsc, Mutex};
use tracing::info;

use ft_core::identity::{Identity, IdentityError, IdentityEvent};
use ft_core::ports::IdentityPort;

const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const EVENT_CHANNEL_CAPACITY: usize = 16;

pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    current: Mutex<Option<Identity>>,
    subscribers: Mutex<Vec<mpsc::Sender<IdentityEvent>>>,
}

#[derive(Deserialize)]
struct AccountResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpIdentityClient {
    /// Create a client against the provider's production endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (tests, emulators).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            current: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1/accounts:{}?key={}", self.base_url, action, self.api_key)
    }

    async fn call<T>(&self, action: &str, body: serde_json::Value) -> Result<T, IdentityError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await
            .map_err(|err| IdentityError::Network(err.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|err| IdentityError::Unknown(err.to_string()))
        } else {
            let envelope: ErrorEnvelope = response
                .json()
                .await
                .map_err(|err| IdentityError::Unknown(err.to_string()))?;
            Err(classify(&envelope.error.message))
        }
    }

    async fn set_current(&self, identity: Option<Identity>) {
        *self.current.lock().await = identity.clone();
        self.broadcast(IdentityEvent::Changed(identity)).await;
    }

    async fn broadcast(&self, event: IdentityEvent) {
        let mut subscribers = self.subscribers.lock().await;
        let mut open = Vec::with_capacity(subscribers.len());
        for tx in subscribers.drain(..) {
            if tx.send(event.clone()).await.is_ok() {
                open.push(tx);
            }
        }
        *subscribers = open;
    }
}

/// Map provider error codes onto the identity error taxonomy.
///
/// Codes occasionally carry a trailing explanation
/// (`"WEAK_PASSWORD : Password should be at least 6 characters"`).
fn classify(message: &str) -> IdentityError {
    let code = message.split_whitespace().next().unwrap_or(message);
    match code {
        "EMAIL_EXISTS" => IdentityError::EmailInUse,
        "INVALID_EMAIL" | "MISSING_EMAIL" => IdentityError::InvalidEmail,
        "WEAK_PASSWORD" => IdentityError::WeakPassword,
        "EMAIL_NOT_FOUND" => IdentityError::UserNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => IdentityError::WrongPassword,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => IdentityError::TooManyRequests,
        other => IdentityError::Unknown(other.to_string()),
    }
}

#[async_trait]
impl IdentityPort for HttpIdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let account: AccountResponse = self
            .call(
                "signUp",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let identity = Identity {
            uid: account.local_id,
            email: account.email.unwrap_or_else(|| email.to_string()),
            email_verified: false,
        };
        info!(uid = %identity.uid, "account created");
        self.set_current(Some(identity.clone())).await;
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let account: AccountResponse = self
            .call(
                "signInWithPassword",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let identity = Identity {
            uid: account.local_id,
            email: account.email.unwrap_or_else(|| email.to_string()),
            email_verified: false,
        };
        info!(uid = %identity.uid, "signed in");
        self.set_current(Some(identity.clone())).await;
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        info!("signed out");
        self.set_current(None).await;
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<(), IdentityError> {
        self.call::<serde_json::Value>(
            "sendOobCode",
            serde_json::json!({
                "requestType": "PASSWORD_RESET",
                "email": email,
            }),
        )
        .await?;

        info!("password reset email requested");
        Ok(())
    }

    async fn subscribe(&self) -> mpsc::Receiver<IdentityEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let current = self.current.lock().await.clone();
        // Deliver the current identity as the subscriber's first event.
        let _ = tx.send(IdentityEvent::Changed(current)).await;
        self.subscribers.lock().await.push(tx);
        rx
    }
}
