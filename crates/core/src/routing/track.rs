//! Settlement flow of the Track screen.

use serde::{Deserialize, Serialize};

use super::routing_model::Notice;
use crate::commitments::progress::{completion_outcome, compute_progress, format_progress};
use crate::commitments::{CommitmentDraft, CompletionOutcome};
use crate::transactions::{TransactionStatus, TransactionType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackOutcome {
    /// The window closed or the goal was met.
    Complete(CompletionOutcome),
    /// Still running.
    Continue(Notice),
}

/// Decides whether a tracked commitment is over.
pub fn evaluate_track(commitment: &CommitmentDraft, now: f64) -> TrackOutcome {
    let ended = commitment.end_time.is_some_and(|end| now > end);
    if ended || commitment.met {
        return TrackOutcome::Complete(completion_outcome(commitment));
    }
    TrackOutcome::Continue(encouragement(commitment))
}

fn encouragement(commitment: &CommitmentDraft) -> Notice {
    let progress = commitment
        .progress
        .unwrap_or_else(|| compute_progress(commitment.reported_value, commitment.goal_value));
    let unit = commitment.unit.as_deref().unwrap_or("mi");

    match commitment.goal_value {
        Some(goal) => Notice::encouragement(format!(
            "Keep going! You are at {} of your {} {} goal.",
            format_progress(progress),
            goal,
            unit
        )),
        None => Notice::encouragement("Keep going!"),
    }
}

/// What the Track screen does after a transaction status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionAction {
    /// Still waiting on the chain.
    Await,
    /// Confirmed: reload the commitment and evaluate again.
    Refresh,
    /// Failed: stay put and offer a retry.
    Retry(Notice),
}

pub fn on_transaction_status(
    method: TransactionType,
    status: &TransactionStatus,
) -> TransactionAction {
    match status {
        TransactionStatus::Requested | TransactionStatus::Submitted => TransactionAction::Await,
        TransactionStatus::Confirmed => TransactionAction::Refresh,
        TransactionStatus::Failed { reason } => TransactionAction::Retry(Notice::retryable(
            method,
            format!("{} failed: {}", method, reason),
        )),
    }
}
