//! Completion percentage of a commitment.

use super::commitments_model::{CommitmentDraft, CompletionOutcome};

/// `reported / goal * 100`, or `0` when there is no goal.
///
/// Not clamped: values above 100 mean the goal was exceeded.
pub fn compute_progress(reported_value: Option<f64>, goal_value: Option<f64>) -> f64 {
    match goal_value {
        Some(goal) if goal != 0.0 => reported_value.unwrap_or(0.0) / goal * 100.0,
        _ => 0.0,
    }
}

/// Progress capped to `[0, 100]` for gauges.
pub fn display_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// One-decimal percentage label, e.g. `42.5 %`.
pub fn format_progress(progress: f64) -> String {
    format!("{:.1} %", progress)
}

/// Success requires a positive reported distance at or above the goal.
pub fn completion_outcome(commitment: &CommitmentDraft) -> CompletionOutcome {
    match (commitment.reported_value, commitment.goal_value) {
        (Some(reported), Some(goal)) if reported > 0.0 && reported >= goal => {
            CompletionOutcome::Success
        }
        _ => CompletionOutcome::Failure,
    }
}
