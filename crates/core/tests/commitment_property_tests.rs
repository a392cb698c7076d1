//! Property-based integration tests for commitment conversion and routing.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use commitpool_core::activities::Activity;
use commitpool_core::chain::ChainCommitmentRecord;
use commitpool_core::commitments::normalizer::{from_chain_record, to_chain_request};
use commitpool_core::commitments::progress::compute_progress;
use commitpool_core::commitments::validation::{
    is_valid_activity_parameters, is_valid_activity_selection, is_valid_commitment_request,
    is_valid_time_window,
};
use commitpool_core::commitments::CommitmentDraft;
use commitpool_core::routing::{next_screen, preconditions_met, BlockReason};
use commitpool_core::{FunnelSignals, RouteDecision, Screen};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Generates a chain record with an arbitrary non-negative goal.
fn arb_record() -> impl Strategy<Value = ChainCommitmentRecord> {
    (
        0u128..10_000_000_000,         // goal_value
        0u128..10_000_000_000,         // reported_value
        1u64..2_000_000_000,           // start_time
        1u64..1_000_000,               // window length
        1u128..1_000_000_000_000_000_000_000, // stake
    )
        .prop_map(|(goal, reported, start, length, stake)| ChainCommitmentRecord {
            activity_key: "0xrun".to_string(),
            goal_value: goal,
            reported_value: reported,
            start_time: start,
            end_time: start + length,
            stake,
            exists: true,
            met: false,
        })
}

fn arb_signals() -> impl Strategy<Value = FunnelSignals> {
    any::<[bool; 5]>().prop_map(|b| FunnelSignals {
        wallet_connected: b[0],
        activity_set: b[1],
        stake_set: b[2],
        fitness_identity_linked: b[3],
        commitment_exists: b[4],
    })
}

fn arb_draft() -> impl Strategy<Value = CommitmentDraft> {
    (
        proptest::option::of(0.0f64..1_000.0),
        proptest::option::of(0.0f64..2_000_000_000.0),
        proptest::option::of(0.0f64..2_000_000_000.0),
    )
        .prop_map(|(goal, start, end)| CommitmentDraft {
            goal_value: goal,
            start_time: start,
            end_time: end,
            ..Default::default()
        })
}

fn catalog() -> Vec<Activity> {
    ["Run", "Ride"]
        .iter()
        .enumerate()
        .map(|(i, name)| Activity {
            key: format!("0x{:08x}", i + 1),
            name: name.to_string(),
            oracle: "0x0000000000000000000000000000000000000a11".to_string(),
            allowed: true,
            exists: true,
        })
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Goal survives the round trip through the application value.
    #[test]
    fn prop_goal_round_trip(record in arb_record()) {
        let draft = from_chain_record(&record);
        let params = to_chain_request(&draft).unwrap();
        prop_assert_eq!(params.goal_value, record.goal_value);
    }

    /// Times and stake survive the round trip exactly.
    #[test]
    fn prop_times_and_stake_round_trip(record in arb_record()) {
        let params = to_chain_request(&from_chain_record(&record)).unwrap();
        prop_assert_eq!(params.start_time, record.start_time);
        prop_assert_eq!(params.end_time, record.end_time);
        prop_assert_eq!(params.stake, record.stake);
        prop_assert_eq!(params.deposit_amount, record.stake);
    }

    /// A draft whose activity is unset or absent from a populated catalog
    /// never passes the activity gate.
    #[test]
    fn prop_missing_activity_never_valid(
        draft in arb_draft(),
        key in proptest::option::of("0x[0-9a-f]{1,8}"),
        now in 0.0f64..2_000_000_000.0,
    ) {
        let catalog = catalog();
        prop_assume!(key.as_deref().map_or(true, |k| catalog.iter().all(|a| a.key != k)));
        let draft = CommitmentDraft {
            activity_key: key,
            stake: Some(Decimal::ONE),
            ..draft
        };
        prop_assert!(!is_valid_activity_selection(&draft, &catalog));
        prop_assert!(!is_valid_activity_parameters(&draft, &catalog, now));
        prop_assert!(!is_valid_commitment_request(&draft, &catalog, now));
    }

    /// The same draft passes once its activity is in the catalog.
    #[test]
    fn prop_catalog_activity_is_selectable(draft in arb_draft(), pick in 0usize..2) {
        let catalog = catalog();
        let draft = CommitmentDraft {
            activity_key: Some(catalog[pick].key.clone()),
            ..draft
        };
        prop_assert!(is_valid_activity_selection(&draft, &catalog));
    }

    /// Windows that end before they start, or not after now, are invalid.
    #[test]
    fn prop_time_window_ordering(
        start in 0.0f64..2_000_000_000.0,
        back in 0.0f64..1_000_000.0,
        now in 0.0f64..2_000_000_000.0,
    ) {
        let draft = CommitmentDraft {
            start_time: Some(start),
            end_time: Some(start - back),
            ..Default::default()
        };
        prop_assert!(!is_valid_time_window(&draft, now));

        let draft = CommitmentDraft {
            start_time: Some(now - 10.0),
            end_time: Some(now - back),
            ..Default::default()
        };
        prop_assert!(!is_valid_time_window(&draft, now));
    }

    /// Progress is zero without a goal and otherwise proportional.
    #[test]
    fn prop_progress(reported in 0.0f64..10_000.0, goal in 1.0f64..10_000.0) {
        prop_assert_eq!(compute_progress(Some(reported), Some(0.0)), 0.0);
        let progress = compute_progress(Some(reported), Some(goal));
        prop_assert!((progress - reported / goal * 100.0).abs() < 1e-9);
    }

    /// The routing table never lands on a screen whose preconditions fail.
    #[test]
    fn prop_routing_respects_preconditions(signals in arb_signals()) {
        match next_screen(&signals) {
            RouteDecision::Navigate(screen) => {
                prop_assert!(preconditions_met(screen, &signals));
                if signals.commitment_exists {
                    prop_assert_eq!(screen, Screen::Track);
                }
            }
            RouteDecision::Blocked(reason) => {
                prop_assert_eq!(reason, BlockReason::ConnectWallet);
                prop_assert!(!signals.wallet_connected && !signals.commitment_exists);
            }
        }
    }
}
