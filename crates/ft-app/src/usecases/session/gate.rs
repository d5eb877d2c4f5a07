//! Session gate.
//!
//! Resolves which of the three top-level flows is active from two
//! independently arriving inputs: the identity subscription and the
//! onboarding completion flag. The gate re-evaluates on every input change
//! for the lifetime of the app; there is no terminal state.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use ft_core::identity::{Identity, IdentityError, IdentityEvent};
use ft_core::ports::SessionEventPort;
use ft_core::session::{SessionInputs, SessionView};

struct GateState {
    inputs: SessionInputs,
    emitted: Option<SessionView>,
}

pub struct SessionGate {
    state: Mutex<GateState>,
    events: Arc<dyn SessionEventPort>,
}

impl SessionGate {
    pub fn new(events: Arc<dyn SessionEventPort>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(GateState {
                inputs: SessionInputs::default(),
                emitted: None,
            }),
            events,
        })
    }

    /// Currently resolved view.
    pub async fn current_view(&self) -> SessionView {
        self.state.lock().await.inputs.view()
    }

    /// Apply an identity change and re-evaluate.
    pub async fn apply_identity(&self, identity: Option<Identity>) {
        let mut state = self.state.lock().await;
        state.inputs.apply_identity(identity);
        self.emit_if_changed(&mut state).await;
    }

    /// Apply an onboarding completion update and re-evaluate.
    pub async fn apply_completion(&self, complete: bool) {
        let mut state = self.state.lock().await;
        state.inputs.apply_completion(complete);
        self.emit_if_changed(&mut state).await;
    }

    /// Degrade to signed-out on a subscription error and surface it.
    pub async fn apply_identity_error(&self, error: IdentityError) {
        warn!(error = %error, "identity subscription reported an error");
        self.events.identity_error(error).await;
        self.apply_identity(None).await;
    }

    async fn emit_if_changed(&self, state: &mut GateState) {
        let view = state.inputs.view();
        if state.emitted == Some(view) {
            debug!(?view, "session view unchanged");
            return;
        }
        info!(from = ?state.emitted, to = ?view, "session view transition");
        state.emitted = Some(view);
        self.events.view_changed(view).await;
    }

    /// Drive the gate from its two input channels.
    ///
    /// A closed channel disables that input without stopping the other; the
    /// loop ends once both are closed.
    pub fn spawn(
        self: Arc<Self>,
        mut identity_rx: mpsc::Receiver<IdentityEvent>,
        mut completion_rx: mpsc::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut identity_open = true;
            let mut completion_open = true;
            while identity_open || completion_open {
                tokio::select! {
                    event = identity_rx.recv(), if identity_open => match event {
                        Some(IdentityEvent::Changed(identity)) => self.apply_identity(identity).await,
                        Some(IdentityEvent::Error(error)) => self.apply_identity_error(error).await,
                        None => identity_open = false,
                    },
                    complete = completion_rx.recv(), if completion_open => match complete {
                        Some(complete) => self.apply_completion(complete).await,
                        None => completion_open = false,
                    },
                }
            }
            debug!("session gate input channels closed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::time::{sleep, Duration, Instant};

    #[derive(Default)]
    struct RecordingSessionEvents {
        views: Mutex<Vec<SessionView>>,
        errors: Mutex<Vec<IdentityError>>,
    }

    impl RecordingSessionEvents {
        async fn views(&self) -> Vec<SessionView> {
            self.views.lock().await.clone()
        }

        async fn errors(&self) -> Vec<IdentityError> {
            self.errors.lock().await.clone()
        }
    }

    #[async_trait]
    impl SessionEventPort for RecordingSessionEvents {
        async fn view_changed(&self, view: SessionView) {
            self.views.lock().await.push(view);
        }

        async fn identity_error(&self, error: IdentityError) {
            self.errors.lock().await.push(error);
        }
    }

    fn identity(uid: &str) -> Identity {
        Identity {
            uid: uid.to_string(),
            email: format!("{uid}@example.com"),
            email_verified: false,
        }
    }

    #[tokio::test]
    async fn stays_loading_until_both_inputs_known() {
        let events = Arc::new(RecordingSessionEvents::default());
        let gate = SessionGate::new(events.clone());

        assert_eq!(gate.current_view().await, SessionView::Loading);

        gate.apply_identity(None).await;
        assert_eq!(gate.current_view().await, SessionView::Loading);

        gate.apply_completion(true).await;
        assert_eq!(gate.current_view().await, SessionView::Authentication);

        assert_eq!(
            events.views().await,
            vec![SessionView::Loading, SessionView::Authentication]
        );
    }

    #[tokio::test]
    async fn signed_out_completed_then_sign_in_goes_home() {
        let events = Arc::new(RecordingSessionEvents::default());
        let gate = SessionGate::new(events.clone());

        gate.apply_identity(None).await;
        gate.apply_completion(true).await;
        assert_eq!(gate.current_view().await, SessionView::Authentication);

        gate.apply_identity(Some(identity("u1"))).await;
        assert_eq!(gate.current_view().await, SessionView::Home);

        // Never routed through onboarding on the way in.
        assert!(!events.views().await.contains(&SessionView::Onboarding));
    }

    #[tokio::test]
    async fn incomplete_onboarding_shown_regardless_of_identity() {
        let events = Arc::new(RecordingSessionEvents::default());
        let gate = SessionGate::new(events.clone());

        gate.apply_completion(false).await;
        gate.apply_identity(Some(identity("u1"))).await;
        assert_eq!(gate.current_view().await, SessionView::Onboarding);

        gate.apply_identity(None).await;
        assert_eq!(gate.current_view().await, SessionView::Onboarding);

        // Completing the funnel while signed out re-evaluates to auth.
        gate.apply_completion(true).await;
        assert_eq!(gate.current_view().await, SessionView::Authentication);
    }

    #[tokio::test]
    async fn completing_funnel_while_signed_in_goes_straight_home() {
        let events = Arc::new(RecordingSessionEvents::default());
        let gate = SessionGate::new(events.clone());

        gate.apply_completion(false).await;
        gate.apply_identity(Some(identity("u1"))).await;
        assert_eq!(gate.current_view().await, SessionView::Onboarding);

        gate.apply_completion(true).await;

        assert_eq!(gate.current_view().await, SessionView::Home);
        assert!(!events.views().await.contains(&SessionView::Authentication));
    }

    #[tokio::test]
    async fn sign_out_from_home_falls_back_to_authentication() {
        let events = Arc::new(RecordingSessionEvents::default());
        let gate = SessionGate::new(events.clone());

        gate.apply_completion(true).await;
        gate.apply_identity(Some(identity("u1"))).await;
        assert_eq!(gate.current_view().await, SessionView::Home);

        gate.apply_identity(None).await;
        assert_eq!(gate.current_view().await, SessionView::Authentication);
    }

    #[tokio::test]
    async fn subscription_error_degrades_to_signed_out() {
        let events = Arc::new(RecordingSessionEvents::default());
        let gate = SessionGate::new(events.clone());

        gate.apply_completion(true).await;
        gate.apply_identity_error(IdentityError::Network("dns failure".to_string()))
            .await;

        assert_eq!(gate.current_view().await, SessionView::Authentication);
        assert_eq!(
            events.errors().await,
            vec![IdentityError::Network("dns failure".to_string())]
        );
    }

    #[tokio::test]
    async fn equal_views_are_not_re_emitted() {
        let events = Arc::new(RecordingSessionEvents::default());
        let gate = SessionGate::new(events.clone());

        gate.apply_completion(true).await;
        gate.apply_identity(Some(identity("u1"))).await;
        gate.apply_identity(Some(identity("u1"))).await;
        gate.apply_completion(true).await;

        assert_eq!(
            events.views().await,
            vec![SessionView::Loading, SessionView::Home]
        );
    }

    #[tokio::test]
    async fn spawned_loop_applies_events_from_both_channels() {
        let events = Arc::new(RecordingSessionEvents::default());
        let gate = SessionGate::new(events.clone());

        let (identity_tx, identity_rx) = mpsc::channel(8);
        let (completion_tx, completion_rx) = mpsc::channel(8);
        let task = gate.clone().spawn(identity_rx, completion_rx);

        completion_tx.send(true).await.unwrap();
        identity_tx
            .send(IdentityEvent::Changed(Some(identity("u1"))))
            .await
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(1);
        while gate.current_view().await != SessionView::Home {
            assert!(Instant::now() < deadline, "gate never reached Home");
            sleep(Duration::from_millis(10)).await;
        }

        identity_tx
            .send(IdentityEvent::Error(IdentityError::Unknown("boom".to_string())))
            .await
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(1);
        while gate.current_view().await != SessionView::Authentication {
            assert!(Instant::now() < deadline, "gate never degraded to Authentication");
            sleep(Duration::from_millis(10)).await;
        }

        // Closing one channel keeps the other alive.
        drop(completion_tx);
        identity_tx
            .send(IdentityEvent::Changed(Some(identity("u1"))))
            .await
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(1);
        while gate.current_view().await != SessionView::Home {
            assert!(Instant::now() < deadline, "gate stopped after one channel closed");
            sleep(Duration::from_millis(10)).await;
        }

        drop(identity_tx);
        task.await.unwrap();
    }
}
