#[cfg(test)]
mod tests {
    use crate::chain::ChainCommitmentRecord;
    use crate::commitments::normalizer::*;
    use crate::commitments::progress::*;
    use crate::commitments::validation::*;
    use crate::commitments::{CommitmentDraft, CompletionOutcome, Requirement};
    use crate::errors::{Error, ValidationError};
    use crate::test_env::{ride_activity, run_activity, NOW};
    use rust_decimal_macros::dec;

    fn valid_draft() -> CommitmentDraft {
        CommitmentDraft {
            activity_key: Some(run_activity().key),
            goal_value: Some(26.2),
            start_time: Some(NOW + 86_400.0),
            end_time: Some(NOW + 8.0 * 86_400.0),
            stake: Some(dec!(25)),
            ..Default::default()
        }
    }

    // ==================== Validator ====================

    #[test]
    fn test_valid_draft_passes_every_check() {
        let catalog = vec![run_activity(), ride_activity()];
        let draft = valid_draft();

        assert!(is_valid_activity_selection(&draft, &catalog));
        assert!(is_valid_time_window(&draft, NOW));
        assert!(is_valid_goal(&draft));
        assert!(is_valid_stake(&draft));
        assert!(is_valid_activity_parameters(&draft, &catalog, NOW));
        assert!(is_valid_commitment_request(&draft, &catalog, NOW));
        assert!(unmet_requirements(&draft, &catalog, NOW).is_empty());
    }

    #[test]
    fn test_missing_activity_fails_activity_parameters() {
        let catalog = vec![run_activity()];
        let mut draft = valid_draft();
        draft.activity_key = None;
        assert!(!is_valid_activity_parameters(&draft, &catalog, NOW));

        draft.activity_key = Some(String::new());
        assert!(!is_valid_activity_parameters(&draft, &catalog, NOW));
    }

    #[test]
    fn test_activity_outside_catalog_is_rejected() {
        let mut draft = valid_draft();
        draft.activity_key = Some("0xswim".to_string());
        assert!(!is_valid_activity_selection(&draft, &[run_activity()]));
        assert!(!is_valid_activity_selection(&valid_draft(), &[]));
    }

    #[test]
    fn test_time_window_must_be_ordered_and_in_the_future() {
        let mut draft = valid_draft();
        draft.end_time = draft.start_time;
        assert!(!is_valid_time_window(&draft, NOW));

        draft.end_time = Some(draft.start_time.unwrap() - 1.0);
        assert!(!is_valid_time_window(&draft, NOW));

        let mut draft = valid_draft();
        draft.start_time = Some(NOW - 200.0);
        draft.end_time = Some(NOW);
        assert!(!is_valid_time_window(&draft, NOW));

        draft.end_time = Some(NOW + 1.0);
        assert!(is_valid_time_window(&draft, NOW));
    }

    #[test]
    fn test_unset_times_fail() {
        let mut draft = valid_draft();
        draft.start_time = None;
        assert!(!is_valid_time_window(&draft, NOW));
    }

    #[test]
    fn test_zero_stake_rejects_otherwise_valid_request() {
        let catalog = vec![run_activity()];
        let mut draft = valid_draft();
        draft.stake = Some(dec!(0));

        assert!(is_valid_activity_parameters(&draft, &catalog, NOW));
        assert!(!is_valid_commitment_request(&draft, &catalog, NOW));
        assert_eq!(
            unmet_requirements(&draft, &catalog, NOW),
            vec![Requirement::Stake]
        );
    }

    #[test]
    fn test_non_positive_goal_fails() {
        let mut draft = valid_draft();
        draft.goal_value = Some(0.0);
        assert!(!is_valid_goal(&draft));
        draft.goal_value = Some(-3.0);
        assert!(!is_valid_goal(&draft));
        draft.goal_value = None;
        assert!(!is_valid_goal(&draft));
    }

    #[test]
    fn test_unmet_requirements_lists_failures_in_funnel_order() {
        let unmet = unmet_requirements(&CommitmentDraft::new(), &[run_activity()], NOW);
        assert_eq!(
            unmet,
            vec![
                Requirement::ActivitySelection,
                Requirement::TimeWindow,
                Requirement::Goal,
                Requirement::Stake,
            ]
        );
    }

    #[test]
    fn test_invalid_commitment_error_explains_itself() {
        let err: Error =
            ValidationError::InvalidCommitment(vec![Requirement::Goal, Requirement::Stake]).into();
        let message = err.to_string();
        assert!(message.contains("distance goal"));
        assert!(message.contains("stake"));
    }

    // ==================== Normalizer ====================

    fn record() -> ChainCommitmentRecord {
        ChainCommitmentRecord {
            activity_key: "0xrun".to_string(),
            goal_value: 2620,
            reported_value: 1310,
            start_time: 1_700_086_400,
            end_time: 1_700_691_200,
            stake: 25_000_000_000_000_000_000,
            exists: true,
            met: false,
        }
    }

    #[test]
    fn test_from_chain_record_scales_values() {
        let draft = from_chain_record(&record());

        assert_eq!(draft.activity_key.as_deref(), Some("0xrun"));
        assert_eq!(draft.goal_value, Some(26.2));
        assert_eq!(draft.reported_value, Some(13.1));
        assert_eq!(draft.start_time, Some(1_700_086_400.0));
        assert_eq!(draft.end_time, Some(1_700_691_200.0));
        assert_eq!(draft.stake, Some(dec!(25)));
        assert_eq!(draft.unit.as_deref(), Some("mi"));
        assert!(draft.exists);
        assert!(!draft.met);
    }

    #[test]
    fn test_to_chain_request_floors_goal_and_ceils_times() {
        let mut draft = valid_draft();
        draft.goal_value = Some(3.999);
        draft.start_time = Some(1_700_000_000.2);
        draft.end_time = Some(1_700_500_000.9);
        draft.stake = Some(dec!(1.5));

        let params = to_chain_request(&draft).unwrap();
        assert_eq!(params.goal_value, 399);
        assert_eq!(params.start_time, 1_700_000_001);
        assert_eq!(params.end_time, 1_700_500_001);
        assert_eq!(params.stake, 1_500_000_000_000_000_000);
        assert_eq!(params.deposit_amount, params.stake);
        assert_eq!(params.activity_key, "0xrun");
    }

    #[test]
    fn test_to_chain_request_reports_missing_field() {
        let mut draft = valid_draft();
        draft.stake = None;
        match to_chain_request(&draft) {
            Err(Error::Validation(ValidationError::MissingField(field))) => {
                assert_eq!(field, "stake")
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_to_chain_request_rejects_negative_goal() {
        let mut draft = valid_draft();
        draft.goal_value = Some(-1.0);
        assert!(matches!(
            to_chain_request(&draft),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_chain_distance_keeps_typed_hundredths() {
        assert_eq!(to_chain_distance(1.15), Some(115));
        assert_eq!(to_chain_distance(0.29), Some(29));
        assert_eq!(to_chain_distance(26.2), Some(2620));
        assert_eq!(to_chain_distance(3.999), Some(399));
        assert_eq!(to_chain_distance(0.0), Some(0));
        assert_eq!(to_chain_distance(-0.5), None);
        assert_eq!(to_chain_distance(f64::NAN), None);
        assert_eq!(to_chain_distance(f64::INFINITY), None);
    }

    #[test]
    fn test_invalid_commitment_error_lists_requirements() {
        let err: Error =
            ValidationError::InvalidCommitment(vec![Requirement::Goal, Requirement::Stake]).into();
        let message = err.to_string();
        assert!(message.contains(Requirement::Goal.message()));
        assert!(message.contains(Requirement::Stake.message()));
        assert!(message.contains("; "));
    }

    #[test]
    fn test_base_unit_conversion() {
        assert_eq!(from_base_units(1_000_000_000_000_000_000), Some(dec!(1)));
        assert_eq!(from_base_units(1), Some(dec!(0.000000000000000001)));
        assert_eq!(from_base_units(u128::MAX), None);
        assert_eq!(to_base_units(dec!(0.5)), Some(500_000_000_000_000_000));
        assert_eq!(to_base_units(dec!(-1)), None);
    }

    #[test]
    fn test_goal_round_trip_stays_within_one() {
        for goal in [0u128, 1, 99, 100, 115, 2620, 4_294_967_295] {
            let mut chain = record();
            chain.goal_value = goal;
            let mut draft = from_chain_record(&chain);
            draft.start_time = Some(1.0);
            draft.end_time = Some(2.0);

            let back = to_chain_request(&draft).unwrap().goal_value;
            assert!(goal.abs_diff(back) <= 1, "{} came back as {}", goal, back);
        }
    }

    // ==================== Progress ====================

    #[test]
    fn test_compute_progress() {
        assert_eq!(compute_progress(Some(50.0), Some(100.0)), 50.0);
        assert_eq!(compute_progress(Some(150.0), Some(100.0)), 150.0);
        assert_eq!(compute_progress(Some(42.0), Some(0.0)), 0.0);
        assert_eq!(compute_progress(Some(42.0), None), 0.0);
        assert_eq!(compute_progress(None, Some(10.0)), 0.0);
    }

    #[test]
    fn test_display_progress_clamps() {
        assert_eq!(display_progress(150.0), 100.0);
        assert_eq!(display_progress(-5.0), 0.0);
        assert_eq!(display_progress(f64::NAN), 0.0);
        assert_eq!(display_progress(42.5), 42.5);
        assert_eq!(format_progress(42.26), "42.3 %");
        assert_eq!(format_progress(100.0), "100.0 %");
    }

    #[test]
    fn test_completion_outcome() {
        let mut draft = valid_draft();
        draft.goal_value = Some(10.0);

        draft.reported_value = Some(10.0);
        assert_eq!(completion_outcome(&draft), CompletionOutcome::Success);

        draft.reported_value = Some(9.99);
        assert_eq!(completion_outcome(&draft), CompletionOutcome::Failure);

        draft.goal_value = Some(0.0);
        draft.reported_value = Some(0.0);
        assert_eq!(completion_outcome(&draft), CompletionOutcome::Failure);
    }
}
