//! Session routing domain.
//!
//! Decides which top-level flow is active from two asynchronously arriving
//! inputs: the onboarding completion flag and the current identity. The
//! resolution is level-triggered: it is recomputed from the latest known
//! inputs every time either one changes, for the lifetime of the app.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Top-level UI flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionView {
    /// Either input source has not reported yet.
    Loading,
    Onboarding,
    Authentication,
    Home,
}

/// What is known about the current identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum IdentityState {
    /// The identity subscription has not delivered its first event yet.
    #[default]
    Unknown,
    SignedOut,
    SignedIn(Identity),
}

/// The session gate's routing inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInputs {
    identity: IdentityState,
    onboarding_complete: Option<bool>,
}

impl SessionInputs {
    /// Record an identity change. `None` means signed out.
    pub fn apply_identity(&mut self, identity: Option<Identity>) {
        self.identity = match identity {
            Some(identity) => IdentityState::SignedIn(identity),
            None => IdentityState::SignedOut,
        };
    }

    /// Record the onboarding completion flag.
    pub fn apply_completion(&mut self, complete: bool) {
        self.onboarding_complete = Some(complete);
    }

    /// Resolve the active view from the current inputs.
    ///
    /// Stays [`SessionView::Loading`] until both sources have reported.
    /// `Home` is reachable only when signed in with onboarding complete;
    /// an incomplete funnel routes to `Onboarding` regardless of identity.
    pub fn view(&self) -> SessionView {
        match (self.onboarding_complete, &self.identity) {
            (None, _) | (_, IdentityState::Unknown) => SessionView::Loading,
            (Some(false), _) => SessionView::Onboarding,
            (Some(true), IdentityState::SignedOut) => SessionView::Authentication,
            (Some(true), IdentityState::SignedIn(_)) => SessionView::Home,
        }
    }
}
