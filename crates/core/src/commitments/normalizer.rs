//! Conversion between contract encodings and application values.
//!
//! The contract stores distances as hundredths of a mile and stakes in
//! 18-decimal base units. Each value is converted exactly once when it
//! crosses the boundary.

use log::warn;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::commitments_model::CommitmentDraft;
use crate::chain::{ChainCommitmentRecord, ChainRequestParameters};
use crate::constants::{DISTANCE_UNIT, GOAL_SCALE, STAKE_TOKEN_DECIMALS};
use crate::errors::{Result, ValidationError};

fn base_unit_factor() -> Decimal {
    Decimal::from(10u64.pow(STAKE_TOKEN_DECIMALS))
}

/// Token base units to a whole-token decimal. `None` when the amount does
/// not fit a `Decimal`.
pub fn from_base_units(amount: u128) -> Option<Decimal> {
    let mantissa = i128::try_from(amount).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, STAKE_TOKEN_DECIMALS)
        .ok()
        .map(|d| d.normalize())
}

/// Whole-token decimal to base units, truncating digits past the token's
/// precision. `None` for negative or oversized amounts.
pub fn to_base_units(amount: Decimal) -> Option<u128> {
    if amount.is_sign_negative() {
        return None;
    }
    amount.checked_mul(base_unit_factor())?.trunc().to_u128()
}

pub fn from_chain_distance(value: u128) -> f64 {
    value as f64 / GOAL_SCALE
}

/// Scales a distance for the contract, never rounding the goal up.
///
/// Scaling happens in decimal on the shortest form of `value`, so `1.15`
/// becomes `115` rather than the `114` binary floating point would give.
pub fn to_chain_distance(value: f64) -> Option<u128> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let value: Decimal = value.to_string().parse().ok()?;
    let scale = Decimal::from_f64(GOAL_SCALE)?;
    value.checked_mul(scale)?.floor().to_u128()
}

/// Rounds a timestamp up to whole seconds so the window never opens early.
pub fn to_chain_timestamp(value: f64) -> Option<u64> {
    let seconds = value.ceil();
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    seconds.to_u64()
}

/// Builds the application view of a `commitments(address)` record.
pub fn from_chain_record(record: &ChainCommitmentRecord) -> CommitmentDraft {
    let stake = from_base_units(record.stake);
    if stake.is_none() {
        warn!("Stake of {} base units does not fit a decimal", record.stake);
    }

    CommitmentDraft {
        activity_key: Some(record.activity_key.clone()),
        goal_value: Some(from_chain_distance(record.goal_value)),
        reported_value: Some(from_chain_distance(record.reported_value)),
        start_time: Some(record.start_time as f64),
        end_time: Some(record.end_time as f64),
        stake,
        exists: record.exists,
        met: record.met,
        unit: Some(DISTANCE_UNIT.to_string()),
        ..CommitmentDraft::default()
    }
}

/// Builds the `depositAndCommit` arguments. The deposit equals the stake.
pub fn to_chain_request(draft: &CommitmentDraft) -> Result<ChainRequestParameters> {
    let activity_key = draft
        .activity_key
        .clone()
        .ok_or_else(|| ValidationError::MissingField("activityKey".to_string()))?;
    let goal = draft
        .goal_value
        .ok_or_else(|| ValidationError::MissingField("goalValue".to_string()))?;
    let start = draft
        .start_time
        .ok_or_else(|| ValidationError::MissingField("startTime".to_string()))?;
    let end = draft
        .end_time
        .ok_or_else(|| ValidationError::MissingField("endTime".to_string()))?;
    let stake = draft
        .stake
        .ok_or_else(|| ValidationError::MissingField("stake".to_string()))?;

    let goal_value = to_chain_distance(goal)
        .ok_or_else(|| ValidationError::InvalidInput(format!("Goal {} out of range", goal)))?;
    let start_time = to_chain_timestamp(start).ok_or_else(|| {
        ValidationError::InvalidInput(format!("Start time {} out of range", start))
    })?;
    let end_time = to_chain_timestamp(end)
        .ok_or_else(|| ValidationError::InvalidInput(format!("End time {} out of range", end)))?;
    let stake_units = to_base_units(stake)
        .ok_or_else(|| ValidationError::InvalidInput(format!("Stake {} out of range", stake)))?;

    Ok(ChainRequestParameters {
        activity_key,
        goal_value,
        start_time,
        end_time,
        stake: stake_units,
        deposit_amount: stake_units,
    })
}
