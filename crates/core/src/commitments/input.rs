//! Parsing of free-text inputs from the setup screens.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::HIGH_STAKE_THRESHOLD;

/// Parses a stake amount; `None` unless it is a number greater than zero.
pub fn parse_stake_input(input: &str) -> Option<Decimal> {
    Decimal::from_str(input.trim())
        .ok()
        .filter(|stake| *stake > Decimal::ZERO)
}

/// Parses a distance; `None` unless it is a finite number greater than zero.
pub fn parse_distance_input(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d > 0.0)
}

/// Parses a whole number of days; `None` for anything else.
pub fn parse_days_input(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok()
}

pub fn is_high_stake(stake: Decimal) -> bool {
    stake >= Decimal::from(HIGH_STAKE_THRESHOLD)
}
