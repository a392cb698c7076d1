//! Environment module - network presets and contract call settings.

mod network;

pub use network::{athlete_profile_url, ChainSettings, Network};
