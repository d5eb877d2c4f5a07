//! Paywall plan selection.

use serde::{Deserialize, Serialize};

/// Subscription tier chosen on the paywall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier, also used when the paywall is skipped.
    Basic,
    Premium,
}

impl PlanTier {
    /// Stable identifier persisted to the durable store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }

    /// Parse a stored identifier.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "basic" => Some(Self::Basic),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}
