//! Application assembly.
//!
//! The durable store, identity client and session event sink are explicitly
//! constructed service objects injected here; nothing in the core reaches
//! for global state.

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::info;

use ft_core::ports::{IdentityPort, KeyValueStorePort, SessionEventPort};

use crate::usecases::auth::{RequestPasswordReset, SignIn, SignOut, SignUp};
use crate::usecases::onboarding::OnboardingEngine;
use crate::usecases::plan::ChoosePlan;
use crate::usecases::session::SessionGate;

/// External collaborators required to run the core.
///
/// This struct is the dependency manifest: all collaborators must be
/// provided, none have defaults.
pub struct AppDeps {
    pub store: Arc<dyn KeyValueStorePort>,
    pub identity: Arc<dyn IdentityPort>,
    pub session_events: Arc<dyn SessionEventPort>,
}

/// The assembled application core.
pub struct App {
    pub onboarding: Arc<OnboardingEngine>,
    pub gate: Arc<SessionGate>,
    pub sign_up: SignUp,
    pub sign_in: SignIn,
    pub sign_out: SignOut,
    pub reset_password: RequestPasswordReset,
    pub choose_plan: ChoosePlan,
    gate_task: JoinHandle<()>,
}

impl App {
    /// Assemble and start the core.
    ///
    /// Wires the engine and the gate to their input channels, spawns the
    /// gate's supervisory loop, then loads persisted onboarding state so the
    /// gate receives its onboarding input.
    pub async fn start(deps: AppDeps) -> Result<App> {
        let AppDeps {
            store,
            identity,
            session_events,
        } = deps;

        let (onboarding, completion_rx) = OnboardingEngine::new(Arc::clone(&store));
        let identity_rx = identity.subscribe().await;
        let gate = SessionGate::new(session_events);
        let gate_task = Arc::clone(&gate).spawn(identity_rx, completion_rx);

        onboarding.load().await;
        info!("application core started");

        Ok(App {
            onboarding,
            gate,
            sign_up: SignUp::new(Arc::clone(&identity)),
            sign_in: SignIn::new(Arc::clone(&identity)),
            sign_out: SignOut::new(Arc::clone(&identity)),
            reset_password: RequestPasswordReset::new(identity),
            choose_plan: ChoosePlan::new(store),
            gate_task,
        })
    }

    /// Stop the gate's supervisory loop.
    pub fn shutdown(&self) {
        self.gate_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ft_core::identity::{Identity, IdentityError, IdentityEvent};
    use ft_core::onboarding::keys;
    use ft_core::session::SessionView;
    use ft_infra::MemoryKeyValueRepository;
    use tokio::sync::{mpsc, Mutex};
    use tokio::time::{sleep, Duration, Instant};

    /// Identity port whose subscription is fed by the test.
    #[derive(Default)]
    struct ChannelIdentityPort {
        senders: Mutex<Vec<mpsc::Sender<IdentityEvent>>>,
    }

    impl ChannelIdentityPort {
        async fn emit(&self, event: IdentityEvent) {
            for tx in self.senders.lock().await.iter() {
                let _ = tx.send(event.clone()).await;
            }
        }
    }

    #[async_trait]
    impl ft_core::ports::IdentityPort for ChannelIdentityPort {
        async fn sign_up(&self, _email: &str, _password: &str) -> Result<Identity, IdentityError> {
            Err(IdentityError::Unknown("not scripted".to_string()))
        }

        async fn sign_in(&self, _email: &str, _password: &str) -> Result<Identity, IdentityError> {
            Err(IdentityError::Unknown("not scripted".to_string()))
        }

        async fn sign_out(&self) -> Result<(), IdentityError> {
            Ok(())
        }

        async fn reset_password(&self, _email: &str) -> Result<(), IdentityError> {
            Ok(())
        }

        async fn subscribe(&self) -> mpsc::Receiver<IdentityEvent> {
            let (tx, rx) = mpsc::channel(8);
            self.senders.lock().await.push(tx);
            rx
        }
    }

    #[derive(Default)]
    struct RecordingSessionEvents {
        views: Mutex<Vec<SessionView>>,
    }

    #[async_trait]
    impl SessionEventPort for RecordingSessionEvents {
        async fn view_changed(&self, view: SessionView) {
            self.views.lock().await.push(view);
        }

        async fn identity_error(&self, _error: IdentityError) {}
    }

    async fn wait_for_view(app: &App, view: SessionView) {
        let deadline = Instant::now() + Duration::from_secs(1);
        while app.gate.current_view().await != view {
            assert!(
                Instant::now() < deadline,
                "gate never reached {view:?}"
            );
            sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn returning_user_is_routed_to_authentication() {
        let store = Arc::new(MemoryKeyValueRepository::new());
        store.set(keys::COMPLETED, "true").await.unwrap();

        let identity = Arc::new(ChannelIdentityPort::default());
        let app = App::start(AppDeps {
            store,
            identity: identity.clone(),
            session_events: Arc::new(RecordingSessionEvents::default()),
        })
        .await
        .unwrap();

        identity.emit(IdentityEvent::Changed(None)).await;

        wait_for_view(&app, SessionView::Authentication).await;
        app.shutdown();
    }

    #[tokio::test]
    async fn fresh_install_runs_the_funnel_then_reaches_home() {
        let store = Arc::new(MemoryKeyValueRepository::new());
        let identity = Arc::new(ChannelIdentityPort::default());
        let app = App::start(AppDeps {
            store,
            identity: identity.clone(),
            session_events: Arc::new(RecordingSessionEvents::default()),
        })
        .await
        .unwrap();

        identity.emit(IdentityEvent::Changed(None)).await;
        wait_for_view(&app, SessionView::Onboarding).await;

        app.onboarding.add_answer("primaryFocus", "mental").await;
        app.onboarding.next_step().await;
        app.choose_plan.execute(ft_core::plan::PlanTier::Premium).await.unwrap();
        app.onboarding.complete_onboarding().await.unwrap();

        wait_for_view(&app, SessionView::Authentication).await;

        identity
            .emit(IdentityEvent::Changed(Some(Identity {
                uid: "u1".to_string(),
                email: "u1@example.com".to_string(),
                email_verified: false,
            })))
            .await;

        wait_for_view(&app, SessionView::Home).await;
        app.shutdown();
    }
}
