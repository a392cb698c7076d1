//! Shared commitment record.

use log::debug;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::commitments_model::CommitmentDraft;
use super::input::{parse_distance_input, parse_stake_input};
use super::progress::compute_progress;
use super::validation::{is_valid_activity_parameters, is_valid_stake};
use crate::activities::{find_activity, Activity, CatalogState};
use crate::utils::Clock;

#[derive(Debug, Default)]
struct StoreState {
    draft: CommitmentDraft,
    catalog: CatalogState,
}

/// Single owner of the commitment record read and written by every screen.
///
/// All writes go through [`update`](Self::update), which applies the change
/// to the latest snapshot under the write lock and then re-derives
/// `activity_set`, `stake_set`, `activity_name` and `progress`.
#[derive(Clone)]
pub struct CommitmentStore {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<dyn Clock>,
}

impl CommitmentStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            clock,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn now(&self) -> f64 {
        self.clock.now_seconds()
    }

    pub fn snapshot(&self) -> CommitmentDraft {
        self.read().draft.clone()
    }

    pub fn catalog(&self) -> CatalogState {
        self.read().catalog.clone()
    }

    pub fn set_catalog(&self, activities: Vec<Activity>) {
        let now = self.now();
        let mut state = self.write();
        state.catalog = CatalogState::Loaded(activities);
        let StoreState { draft, catalog } = &mut *state;
        derive(draft, catalog.activities(), now);
    }

    /// Read-modify-write on the latest draft. Returns the updated snapshot.
    pub fn update<F>(&self, mutate: F) -> CommitmentDraft
    where
        F: FnOnce(&mut CommitmentDraft),
    {
        let now = self.now();
        let mut state = self.write();
        let StoreState { draft, catalog } = &mut *state;
        mutate(draft);
        derive(draft, catalog.activities(), now);
        draft.clone()
    }

    pub fn select_activity(&self, key: &str) -> CommitmentDraft {
        let key = key.to_string();
        self.update(move |draft| draft.activity_key = Some(key))
    }

    /// Keeps the previous goal when the input is not a positive number.
    pub fn set_goal_input(&self, input: &str) -> CommitmentDraft {
        match parse_distance_input(input) {
            Some(goal) => self.update(|draft| draft.goal_value = Some(goal)),
            None => self.snapshot(),
        }
    }

    /// Clears the stake when the input is not a positive amount.
    pub fn set_stake_input(&self, input: &str) -> CommitmentDraft {
        let stake = parse_stake_input(input);
        self.update(|draft| draft.stake = stake)
    }

    pub fn set_window(&self, start_time: f64, end_time: f64) -> CommitmentDraft {
        self.update(|draft| {
            draft.start_time = Some(start_time);
            draft.end_time = Some(end_time);
        })
    }

    /// Merges a record read from the contract.
    ///
    /// When the contract holds a commitment its fields replace the local
    /// ones; otherwise only the chain flags are cleared so a draft in
    /// progress survives the refresh.
    pub fn merge_chain_record(&self, record: CommitmentDraft) -> CommitmentDraft {
        self.update(move |draft| {
            if record.exists {
                draft.activity_key = record.activity_key;
                draft.goal_value = record.goal_value;
                draft.reported_value = record.reported_value;
                draft.start_time = record.start_time;
                draft.end_time = record.end_time;
                draft.stake = record.stake;
                draft.unit = record.unit;
                draft.exists = true;
                draft.met = record.met;
            } else {
                draft.exists = false;
                draft.met = false;
            }
        })
    }

    /// Records a reported distance. Returns `false` without writing when
    /// neither the distance nor the resulting progress changed.
    pub fn apply_reported_value(&self, reported: f64) -> bool {
        {
            let state = self.read();
            let progress = compute_progress(Some(reported), state.draft.goal_value);
            if state.draft.reported_value == Some(reported) && state.draft.progress == Some(progress)
            {
                debug!("Reported value {} unchanged, skipping write", reported);
                return false;
            }
        }
        self.update(|draft| draft.reported_value = Some(reported));
        true
    }

    /// Drops the current draft and starts a fresh one.
    pub fn reset(&self) -> CommitmentDraft {
        self.update(|draft| *draft = CommitmentDraft::default())
    }
}

fn derive(draft: &mut CommitmentDraft, catalog: &[Activity], now: f64) {
    draft.activity_set = is_valid_activity_parameters(draft, catalog, now);
    draft.stake_set = is_valid_stake(draft);

    if let Some(activity) = draft
        .activity_key
        .as_deref()
        .and_then(|key| find_activity(key, catalog))
    {
        draft.activity_name = Some(activity.name.clone());
    }

    let goal = draft.goal_value;
    draft.progress = draft
        .reported_value
        .map(|reported| compute_progress(Some(reported), goal));
}
