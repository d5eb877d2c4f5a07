use std::sync::Arc;

use tracing::info;

use ft_core::onboarding::keys;
use ft_core::plan::PlanTier;
use ft_core::ports::{KeyValueStorePort, StorageError};

/// Use case for selecting a plan on the paywall.
///
/// Unlike the funnel mutators, the write is awaited: the paywall navigates
/// on only once the choice is stored.
pub struct ChoosePlan {
    store: Arc<dyn KeyValueStorePort>,
}

impl ChoosePlan {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// Persist the selected plan.
    pub async fn execute(&self, tier: PlanTier) -> Result<(), StorageError> {
        self.store.set(keys::PLAN, tier.as_str()).await?;
        info!(plan = tier.as_str(), "plan selected");
        Ok(())
    }

    /// Skip the paywall, falling back to the basic plan.
    pub async fn skip(&self) -> Result<(), StorageError> {
        self.execute(PlanTier::Basic).await
    }

    /// Read the stored plan, if one was ever selected.
    pub async fn current(&self) -> Result<Option<PlanTier>, StorageError> {
        Ok(self
            .store
            .get(keys::PLAN)
            .await?
            .as_deref()
            .and_then(PlanTier::parse))
    }
}
