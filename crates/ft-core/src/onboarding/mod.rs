//! Onboarding domain models
//!
//! This module defines the core domain models for the onboarding funnel:
//! the collected state (answers, profile, step, completion flag), the
//! ordered funnel steps, and the durable-store key names.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Durable-store key names. Stable across versions.
pub mod keys {
    /// Questionnaire answers, serialized as a JSON object.
    pub const RESPONSES: &str = "onboardingResponses";
    /// Personalization profile fields, serialized as a JSON object.
    pub const PROFILE: &str = "userProfile";
    /// Current funnel step, serialized as decimal text.
    pub const CURRENT_STEP: &str = "currentOnboardingStep";
    /// Completion flag, stored as the literal text `"true"`/`"false"`.
    pub const COMPLETED: &str = "hasCompletedOnboarding";
    /// Selected paywall plan.
    pub const PLAN: &str = "userPlan";

    /// Keys removed by a full onboarding reset.
    ///
    /// The plan selection survives a funnel reset.
    pub const RESET_SCOPE: [&str; 4] = [RESPONSES, PROFILE, CURRENT_STEP, COMPLETED];
}

/// Onboarding funnel state.
///
/// `answers` and `profile` are independent schema-less mappings: answers
/// hold questionnaire responses keyed by question id, the profile holds
/// personalization form fields. Unknown keys are tolerated in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    /// Questionnaire answers keyed by question identifier.
    pub answers: HashMap<String, String>,
    /// Personalization form fields.
    pub profile: HashMap<String, String>,
    /// Current funnel step index.
    pub current_step: u32,
    /// Whether the funnel has been completed.
    pub is_complete: bool,
}

impl OnboardingState {
    /// Insert or overwrite a questionnaire answer.
    pub fn insert_answer(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.answers.insert(question_id.into(), value.into());
    }

    /// Shallow-merge fields into the profile, overwriting existing keys and
    /// keeping everything else.
    pub fn merge_profile(&mut self, fields: HashMap<String, String>) {
        self.profile.extend(fields);
    }

    /// Advance one step and return the new index.
    ///
    /// No upper bound is enforced here; callers stop at the funnel's last
    /// step (see [`FunnelStep`]).
    pub fn advance(&mut self) -> u32 {
        self.current_step = self.current_step.saturating_add(1);
        self.current_step
    }

    /// Go back one step, floored at 0, and return the new index.
    pub fn step_back(&mut self) -> u32 {
        self.current_step = self.current_step.saturating_sub(1);
        self.current_step
    }
}

/// The ordered onboarding funnel screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunnelStep {
    Welcome,
    Questionnaire,
    Personalization,
    ResultsPreview,
    Paywall,
}

impl FunnelStep {
    /// All steps in funnel order.
    pub const ALL: [FunnelStep; 5] = [
        Self::Welcome,
        Self::Questionnaire,
        Self::Personalization,
        Self::ResultsPreview,
        Self::Paywall,
    ];

    /// Map a step index to its funnel step, if in range.
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Position of this step in the funnel.
    pub fn index(self) -> u32 {
        match self {
            Self::Welcome => 0,
            Self::Questionnaire => 1,
            Self::Personalization => 2,
            Self::ResultsPreview => 3,
            Self::Paywall => 4,
        }
    }

    /// Whether this is the final funnel screen.
    pub fn is_last(self) -> bool {
        self == Self::Paywall
    }

    /// The following step, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, if any.
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}
