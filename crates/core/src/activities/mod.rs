//! Activities module - the on-chain activity catalog.

mod activities_model;
mod activities_service;


pub use activities_model::{
    activity_name, find_activity, format_activities, Activity, ActivityOption, CatalogState,
};
pub use activities_service::{ActivityCatalogService, ActivityCatalogServiceTrait};
