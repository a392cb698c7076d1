//! Commitment domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Commitment record shared by every screen of the funnel.
///
/// While the user edits it this is a draft with optional fields. Once the
/// contract holds a commitment for the account it mirrors the chain record
/// (`exists = true`). `activity_set`, `stake_set` and `progress` are derived
/// and maintained by [`CommitmentStore`](super::CommitmentStore).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentDraft {
    pub activity_key: Option<String>,
    pub activity_name: Option<String>,
    /// Distance target in `unit`
    pub goal_value: Option<f64>,
    /// Unix seconds
    pub start_time: Option<f64>,
    /// Unix seconds
    pub end_time: Option<f64>,
    /// Stake in whole tokens
    pub stake: Option<Decimal>,
    pub reported_value: Option<f64>,
    pub unit: Option<String>,
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub met: bool,
    #[serde(default)]
    pub activity_set: bool,
    #[serde(default)]
    pub stake_set: bool,
    pub progress: Option<f64>,
}

impl CommitmentDraft {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A check the draft must pass before it can move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirement {
    ActivitySelection,
    TimeWindow,
    Goal,
    Stake,
}

impl Requirement {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ActivitySelection => "select an activity",
            Self::TimeWindow => "choose a start and end date in the future",
            Self::Goal => "set a distance goal greater than zero",
            Self::Stake => "set a stake greater than zero",
        }
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of the Completion screen's success check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionOutcome {
    Success,
    Failure,
}
