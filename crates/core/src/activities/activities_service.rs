use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::activities_model::Activity;
use crate::chain::CommitContractTrait;
use crate::constants::MAX_CATALOG_ENTRIES;
use crate::errors::Result;

#[async_trait]
pub trait ActivityCatalogServiceTrait: Send + Sync {
    /// Reads the registry and returns the selectable activities.
    async fn load_catalog(&self) -> Result<Vec<Activity>>;
}

/// Loads the activity catalog from the contract registry.
pub struct ActivityCatalogService {
    contract: Arc<dyn CommitContractTrait>,
}

impl ActivityCatalogService {
    pub fn new(contract: Arc<dyn CommitContractTrait>) -> Self {
        Self { contract }
    }
}

#[async_trait]
impl ActivityCatalogServiceTrait for ActivityCatalogService {
    /// The registry has no length accessor; keys are probed by index until
    /// a lookup fails.
    async fn load_catalog(&self) -> Result<Vec<Activity>> {
        let mut catalog = Vec::new();

        for index in 0..MAX_CATALOG_ENTRIES {
            let key = match self.contract.activity_key_list(index).await {
                Ok(key) => key,
                Err(e) => {
                    debug!("Activity registry ends at index {}: {}", index, e);
                    break;
                }
            };

            let activity = match self.contract.activities(&key).await {
                Ok(activity) => Activity::from_chain(key, activity),
                Err(e) => {
                    debug!("Failed to read activity {}: {}", key, e);
                    break;
                }
            };

            if activity.is_selectable() {
                catalog.push(activity);
            }
        }

        info!("Loaded {} selectable activities", catalog.len());
        Ok(catalog)
    }
}
