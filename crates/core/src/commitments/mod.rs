//! Commitments module - draft record, validation, normalization and progress.

mod commitments_model;
mod commitments_service;
mod commitments_traits;
mod input;
pub mod normalizer;
pub mod progress;
mod store;
mod tracking_service;
pub mod validation;

#[cfg(test)]
mod commitments_model_tests;

pub use commitments_model::{CommitmentDraft, CompletionOutcome, Requirement};
pub use commitments_service::CommitmentService;
pub use commitments_traits::CommitmentServiceTrait;
pub use input::{is_high_stake, parse_days_input, parse_distance_input, parse_stake_input};
pub use store::CommitmentStore;
pub use tracking_service::TrackingService;
