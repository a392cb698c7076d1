//! CommitPool Strava - HTTP clients for the fitness provider and backend.
//!
//! Implements the athlete seams of `commitpool-core`: OAuth and profile
//! lookups against Strava, activity totals and user registration against
//! the CommitPool backend.

pub mod client;
pub mod config;
mod http;
mod models;
pub mod progress;

pub use client::StravaClient;
pub use config::StravaConfig;
pub use progress::ProgressApiClient;
