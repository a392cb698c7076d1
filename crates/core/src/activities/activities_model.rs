//! Activity catalog models.

use serde::{Deserialize, Serialize};

use crate::chain::{Address, ChainActivity};

/// Entry of the on-chain activity registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub key: String,
    pub name: String,
    pub oracle: Address,
    pub allowed: bool,
    pub exists: bool,
}

impl Activity {
    pub fn from_chain(key: impl Into<String>, activity: ChainActivity) -> Self {
        Self {
            key: key.into(),
            name: activity.name,
            oracle: activity.oracle,
            allowed: activity.allowed,
            exists: activity.exists,
        }
    }

    /// Whether the registry lets new commitments use this activity.
    pub fn is_selectable(&self) -> bool {
        self.exists && self.allowed
    }
}

/// Label/value pair for the activity dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityOption {
    pub label: String,
    pub value: String,
}

/// Loading state of the catalog. A missing catalog is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Loaded(Vec<Activity>),
}

impl CatalogState {
    pub fn activities(&self) -> &[Activity] {
        match self {
            Self::Loading => &[],
            Self::Loaded(activities) => activities,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

pub fn find_activity<'a>(key: &str, catalog: &'a [Activity]) -> Option<&'a Activity> {
    catalog.iter().find(|a| a.key == key)
}

/// Display name for an activity key, empty when the key is unknown.
pub fn activity_name(key: &str, catalog: &[Activity]) -> String {
    find_activity(key, catalog)
        .map(|a| a.name.clone())
        .unwrap_or_default()
}

pub fn format_activities(catalog: &[Activity]) -> Vec<ActivityOption> {
    catalog
        .iter()
        .map(|activity| {
            let label = match activity.name.as_str() {
                "Run" => "Run 🏃‍♂️".to_string(),
                "Ride" => "Ride 🚲".to_string(),
                other => other.to_string(),
            };
            ActivityOption {
                label,
                value: activity.key.clone(),
            }
        })
        .collect()
}
