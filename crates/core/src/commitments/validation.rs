//! Draft validation.
//!
//! Every check is a pure function over the latest draft snapshot. Unset
//! fields fail their check; nothing here returns an error or panics.

use rust_decimal::Decimal;

use super::commitments_model::{CommitmentDraft, Requirement};
use crate::activities::{find_activity, Activity};

pub fn is_valid_activity_selection(draft: &CommitmentDraft, catalog: &[Activity]) -> bool {
    match draft.activity_key.as_deref() {
        Some(key) if !key.is_empty() => find_activity(key, catalog).is_some(),
        _ => false,
    }
}

pub fn is_valid_time_window(draft: &CommitmentDraft, now: f64) -> bool {
    match (draft.start_time, draft.end_time) {
        (Some(start), Some(end)) => end > start && end > now,
        _ => false,
    }
}

pub fn is_valid_goal(draft: &CommitmentDraft) -> bool {
    draft.goal_value.is_some_and(|goal| goal > 0.0)
}

pub fn is_valid_stake(draft: &CommitmentDraft) -> bool {
    draft.stake.is_some_and(|stake| stake > Decimal::ZERO)
}

/// Gate for `activity_set`.
pub fn is_valid_activity_parameters(
    draft: &CommitmentDraft,
    catalog: &[Activity],
    now: f64,
) -> bool {
    is_valid_activity_selection(draft, catalog)
        && is_valid_time_window(draft, now)
        && is_valid_goal(draft)
}

/// Gate for submitting the commitment.
pub fn is_valid_commitment_request(
    draft: &CommitmentDraft,
    catalog: &[Activity],
    now: f64,
) -> bool {
    is_valid_activity_parameters(draft, catalog, now) && is_valid_stake(draft)
}

/// Lists every check the draft currently fails, in funnel order.
pub fn unmet_requirements(
    draft: &CommitmentDraft,
    catalog: &[Activity],
    now: f64,
) -> Vec<Requirement> {
    let checks = [
        (
            Requirement::ActivitySelection,
            is_valid_activity_selection(draft, catalog),
        ),
        (Requirement::TimeWindow, is_valid_time_window(draft, now)),
        (Requirement::Goal, is_valid_goal(draft)),
        (Requirement::Stake, is_valid_stake(draft)),
    ];

    checks
        .into_iter()
        .filter(|(_, passed)| !passed)
        .map(|(requirement, _)| requirement)
        .collect()
}
