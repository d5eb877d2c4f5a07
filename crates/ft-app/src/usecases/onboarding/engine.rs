//! Onboarding state engine.
//!
//! Holds the in-memory funnel state, synchronizes it to the durable store,
//! and exposes the mutation operations used by screens. Every mutator is
//! fire-and-forget with respect to its caller: the in-memory state changes
//! immediately and the persist runs in the background. The one exception is
//! [`OnboardingEngine::complete_onboarding`], whose flag gates top-level
//! navigation and therefore must not diverge from durable state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::warn;

use ft_core::onboarding::{keys, OnboardingState};
use ft_core::ports::{KeyValueStorePort, StorageError};
use ft_core::recommendation::{derive_recommendation, Recommendation};

const COMPLETION_CHANNEL_CAPACITY: usize = 8;

pub struct OnboardingEngine {
    store: Arc<dyn KeyValueStorePort>,
    state: Mutex<OnboardingState>,
    loaded: AtomicBool,
    completion_tx: mpsc::Sender<bool>,
}

impl OnboardingEngine {
    /// Create the engine together with its completion event receiver.
    ///
    /// The receiver delivers the completion flag once the initial [`load`]
    /// finishes and again on every later completion change; it is the
    /// session gate's onboarding input.
    ///
    /// [`load`]: OnboardingEngine::load
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> (Arc<Self>, mpsc::Receiver<bool>) {
        let (completion_tx, completion_rx) = mpsc::channel(COMPLETION_CHANNEL_CAPACITY);
        let engine = Arc::new(Self {
            store,
            state: Mutex::new(OnboardingState::default()),
            loaded: AtomicBool::new(false),
            completion_tx,
        });
        (engine, completion_rx)
    }

    /// Load persisted state from the durable store.
    ///
    /// Each field is read independently; a missing key or an unreadable
    /// value leaves that field at its default without failing the load.
    /// A second call is a no-op.
    pub async fn load(&self) {
        if self.loaded.swap(true, Ordering::SeqCst) {
            return;
        }

        let answers = self.read_map(keys::RESPONSES).await;
        let profile = self.read_map(keys::PROFILE).await;
        let current_step = self.read_step().await;
        let is_complete = self.read_completed().await;

        {
            let mut state = self.state.lock().await;
            *state = OnboardingState {
                answers,
                profile,
                current_step,
                is_complete,
            };
        }
        self.emit_completion(is_complete).await;
    }

    /// Snapshot of the current in-memory state.
    pub async fn state(&self) -> OnboardingState {
        self.state.lock().await.clone()
    }

    /// Insert or overwrite an answer and persist the whole mapping.
    ///
    /// Schema-agnostic: question ids and values are not validated.
    pub async fn add_answer(&self, question_id: &str, value: &str) {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.insert_answer(question_id, value);
            state.answers.clone()
        };
        self.persist_map(keys::RESPONSES, snapshot);
    }

    /// Merge fields into the profile and persist the whole mapping.
    pub async fn update_profile(&self, fields: HashMap<String, String>) {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.merge_profile(fields);
            state.profile.clone()
        };
        self.persist_map(keys::PROFILE, snapshot);
    }

    /// Advance one funnel step and return the new index.
    pub async fn next_step(&self) -> u32 {
        let step = self.state.lock().await.advance();
        self.persist_value(keys::CURRENT_STEP, step.to_string());
        step
    }

    /// Go back one funnel step, floored at 0, and return the new index.
    pub async fn prev_step(&self) -> u32 {
        let step = self.state.lock().await.step_back();
        self.persist_value(keys::CURRENT_STEP, step.to_string());
        step
    }

    /// Mark onboarding complete.
    ///
    /// The durable write happens first; in-memory state changes only once
    /// the write succeeded.
    pub async fn complete_onboarding(&self) -> Result<(), StorageError> {
        self.store.set(keys::COMPLETED, "true").await?;
        self.state.lock().await.is_complete = true;
        self.emit_completion(true).await;
        Ok(())
    }

    /// Clear the questionnaire answers; profile, step and completion flag
    /// are untouched.
    pub async fn reset_responses(&self) {
        self.state.lock().await.answers.clear();
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.remove(keys::RESPONSES).await {
                warn!(error = %err, key = keys::RESPONSES, "failed to remove persisted answers");
            }
        });
    }

    /// Reset the whole funnel to its initial state and remove all persisted
    /// onboarding keys.
    pub async fn reset_all(&self) {
        *self.state.lock().await = OnboardingState::default();
        self.emit_completion(false).await;
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.remove_many(&keys::RESET_SCOPE).await {
                warn!(error = %err, "failed to remove persisted onboarding state");
            }
        });
    }

    /// Derive the plan recommendation from the collected answers.
    pub async fn recommendation(&self) -> Recommendation {
        derive_recommendation(&*self.state.lock().await)
    }

    async fn read_map(&self, key: &'static str) -> HashMap<String, String> {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(error = %err, key, "stored mapping is unreadable, starting empty");
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(err) => {
                warn!(error = %err, key, "failed to read stored mapping, starting empty");
                HashMap::new()
            }
        }
    }

    async fn read_step(&self) -> u32 {
        match self.store.get(keys::CURRENT_STEP).await {
            Ok(Some(raw)) => match raw.trim().parse() {
                Ok(step) => step,
                Err(err) => {
                    warn!(error = %err, key = keys::CURRENT_STEP, "stored step is unreadable, starting at 0");
                    0
                }
            },
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, key = keys::CURRENT_STEP, "failed to read stored step, starting at 0");
                0
            }
        }
    }

    async fn read_completed(&self) -> bool {
        match self.store.get(keys::COMPLETED).await {
            Ok(Some(raw)) => raw.trim() == "true",
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, key = keys::COMPLETED, "failed to read completion flag, assuming incomplete");
                false
            }
        }
    }

    /// Persist a full snapshot of a mapping in the background.
    fn persist_map(&self, key: &'static str, snapshot: HashMap<String, String>) {
        match serde_json::to_string(&snapshot) {
            Ok(payload) => self.persist_value(key, payload),
            Err(err) => warn!(error = %err, key, "failed to serialize mapping, skipping persist"),
        }
    }

    fn persist_value(&self, key: &'static str, payload: String) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.set(key, &payload).await {
                warn!(error = %err, key, "failed to persist onboarding field");
            }
        });
    }

    async fn emit_completion(&self, complete: bool) {
        // The receiver may already be gone; ignore send failures.
        let _ = self.completion_tx.send(complete).await;
    }
}
