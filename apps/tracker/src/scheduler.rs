//! Periodic progress polling for a tracked commitment.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use commitpool_core::commitments::progress::{display_progress, format_progress};
use commitpool_core::commitments::TrackingService;
use commitpool_core::routing::TrackOutcome;

use crate::main_lib::AppState;

/// Polls the progress endpoint until the Track flow completes.
///
/// The first tick fires immediately.
pub async fn run_progress_scheduler(state: Arc<AppState>, poll_interval: Duration) -> TrackOutcome {
    info!("Progress scheduler started ({}s interval)", poll_interval.as_secs());

    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        run_scheduled_sync(&state.tracking).await;
        state.persist_tokens();

        match state.tracking.evaluate() {
            TrackOutcome::Continue(notice) => debug!("{}", notice.message),
            outcome @ TrackOutcome::Complete(_) => return outcome,
        }
    }
}

async fn run_scheduled_sync(tracking: &TrackingService) {
    match tracking.sync_progress().await {
        Ok(Some(progress)) => info!(
            "Progress updated: {} ({} shown)",
            format_progress(progress),
            format_progress(display_progress(progress))
        ),
        Ok(None) => debug!("Progress unchanged"),
        Err(e) => warn!("Progress sync failed: {}", e),
    }
}
