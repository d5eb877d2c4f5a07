//! Plan recommendation derivation.
//!
//! Pure mapping from the collected onboarding state to the recommended plan
//! preview shown before the paywall. No I/O; identical input always yields
//! identical output.

use serde::{Deserialize, Serialize};

use crate::onboarding::OnboardingState;

/// Question whose answer selects the focus area.
pub const PRIMARY_FOCUS_QUESTION: &str = "primaryFocus";

/// The three coaching focus areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Physical,
    Mental,
    Energy,
}

impl FocusArea {
    pub const ALL: [FocusArea; 3] = [Self::Physical, Self::Mental, Self::Energy];

    /// Stable identifier used in questionnaire answers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Mental => "mental",
            Self::Energy => "energy",
        }
    }

    /// Capitalized name used in plan titles.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Mental => "Mental",
            Self::Energy => "Energy",
        }
    }

    /// Parse an answer value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "physical" => Some(Self::Physical),
            "mental" => Some(Self::Mental),
            "energy" => Some(Self::Energy),
            _ => None,
        }
    }
}

/// Qualitative projected progress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLevel {
    High,
    Medium,
}

/// Projected progress per focus area.
///
/// The selected focus area is always `High`, the others `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedOutcomes {
    pub physical: OutcomeLevel,
    pub mental: OutcomeLevel,
    pub energy: OutcomeLevel,
}

impl ProjectedOutcomes {
    fn for_focus(focus: FocusArea) -> Self {
        let level = |area: FocusArea| {
            if area == focus {
                OutcomeLevel::High
            } else {
                OutcomeLevel::Medium
            }
        };

        Self {
            physical: level(FocusArea::Physical),
            mental: level(FocusArea::Mental),
            energy: level(FocusArea::Energy),
        }
    }

    /// Level projected for a given focus area.
    pub fn level(self, area: FocusArea) -> OutcomeLevel {
        match area {
            FocusArea::Physical => self.physical,
            FocusArea::Mental => self.mental,
            FocusArea::Energy => self.energy,
        }
    }
}

/// Recommended plan preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub focus_area: FocusArea,
    pub projected_outcomes: ProjectedOutcomes,
    pub recommended_plan_name: String,
    pub estimated_duration: String,
}

/// Derive the recommendation from the collected state.
///
/// Falls back to [`FocusArea::Physical`] when the `primaryFocus` answer is
/// missing or not a known value.
pub fn derive_recommendation(state: &OnboardingState) -> Recommendation {
    let focus_area = state
        .answers
        .get(PRIMARY_FOCUS_QUESTION)
        .and_then(|raw| FocusArea::parse(raw))
        .unwrap_or(FocusArea::Physical);

    let estimated_duration = match focus_area {
        FocusArea::Physical => "8 weeks",
        FocusArea::Mental | FocusArea::Energy => "4 weeks",
    };

    Recommendation {
        focus_area,
        projected_outcomes: ProjectedOutcomes::for_focus(focus_area),
        recommended_plan_name: format!("Plan360 {}", focus_area.display_name()),
        estimated_duration: estimated_duration.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_focus(focus: &str) -> OnboardingState {
        let mut state = OnboardingState::default();
        state.insert_answer(PRIMARY_FOCUS_QUESTION, focus);
        state
    }

    #[test]
    fn mental_focus_selects_mental_plan() {
        let recommendation = derive_recommendation(&state_with_focus("mental"));

        assert_eq!(recommendation.focus_area, FocusArea::Mental);
        assert_eq!(recommendation.projected_outcomes.mental, OutcomeLevel::High);
        assert_eq!(recommendation.projected_outcomes.physical, OutcomeLevel::Medium);
        assert_eq!(recommendation.projected_outcomes.energy, OutcomeLevel::Medium);
        assert_eq!(recommendation.recommended_plan_name, "Plan360 Mental");
        assert_eq!(recommendation.estimated_duration, "4 weeks");
    }

    #[test]
    fn missing_focus_falls_back_to_physical() {
        let recommendation = derive_recommendation(&OnboardingState::default());

        assert_eq!(recommendation.focus_area, FocusArea::Physical);
        assert_eq!(recommendation.projected_outcomes.physical, OutcomeLevel::High);
        assert_eq!(recommendation.recommended_plan_name, "Plan360 Physical");
        assert_eq!(recommendation.estimated_duration, "8 weeks");
    }

    #[test]
    fn unknown_focus_value_falls_back_to_physical() {
        let recommendation = derive_recommendation(&state_with_focus("spiritual"));

        assert_eq!(recommendation.focus_area, FocusArea::Physical);
        assert_eq!(recommendation.estimated_duration, "8 weeks");
    }

    #[test]
    fn derivation_is_deterministic() {
        let state = state_with_focus("energy");

        let first = derive_recommendation(&state);
        let second = derive_recommendation(&state);

        assert_eq!(first, second);
        assert_eq!(first.projected_outcomes.level(FocusArea::Energy), OutcomeLevel::High);
    }
}
