use log::{debug, info};
use std::sync::Arc;

use super::store::CommitmentStore;
use crate::athletes::{AthleteServiceTrait, ProgressSourceTrait};
use crate::errors::Result;
use crate::routing::{evaluate_track, TrackOutcome};

/// Keeps the tracked commitment's reported distance in sync with the
/// progress endpoint.
pub struct TrackingService {
    progress_source: Arc<dyn ProgressSourceTrait>,
    athletes: Arc<dyn AthleteServiceTrait>,
    store: CommitmentStore,
}

impl TrackingService {
    pub fn new(
        progress_source: Arc<dyn ProgressSourceTrait>,
        athletes: Arc<dyn AthleteServiceTrait>,
        store: CommitmentStore,
    ) -> Self {
        Self {
            progress_source,
            athletes,
            store,
        }
    }

    /// Fetches the distance covered in the commitment window.
    ///
    /// Returns the new progress when it changed, `None` when the value was
    /// unchanged or the commitment is not loaded yet.
    pub async fn sync_progress(&self) -> Result<Option<f64>> {
        let commitment = self.store.snapshot();
        let (Some(start), Some(end), Some(activity)) = (
            commitment.start_time,
            commitment.end_time,
            commitment.activity_name.clone(),
        ) else {
            debug!("Commitment not loaded, skipping progress sync");
            return Ok(None);
        };

        let access_token = self.athletes.access_token().await?;
        let total = self
            .progress_source
            .activity_total(
                start.ceil() as u64,
                end.ceil() as u64,
                &activity,
                &access_token,
            )
            .await?;

        if !self.store.apply_reported_value(total) {
            return Ok(None);
        }

        let progress = self.store.snapshot().progress;
        info!("Reported {} {} for {}", total, commitment.unit.unwrap_or_default(), activity);
        Ok(progress)
    }

    /// Evaluates the Track flow against the current snapshot.
    pub fn evaluate(&self) -> TrackOutcome {
        evaluate_track(&self.store.snapshot(), self.store.now())
    }
}
