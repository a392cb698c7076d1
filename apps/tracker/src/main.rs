mod config;
mod main_lib;
mod scheduler;
mod snapshot;
mod token_store;

use commitpool_core::commitments::progress::format_progress;
use commitpool_core::commitments::CompletionOutcome;
use commitpool_core::routing::TrackOutcome;
use config::Config;
use main_lib::{build_state, init_tracing, logout};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    if config.logout {
        return logout(&config).await;
    }
    let state = build_state(&config).await?;

    let outcome = tokio::select! {
        outcome = scheduler::run_progress_scheduler(state.clone(), config.poll_interval) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, stopping tracker");
            return Ok(());
        }
    };

    let commitment = state.store.snapshot();
    let progress = format_progress(commitment.progress.unwrap_or_default());
    match outcome {
        TrackOutcome::Complete(CompletionOutcome::Success) => {
            tracing::info!("Commitment met at {}. Process it to reclaim the stake.", progress)
        }
        TrackOutcome::Complete(CompletionOutcome::Failure) => {
            tracing::info!("Commitment window closed at {}. Goal not met.", progress)
        }
        TrackOutcome::Continue(_) => {}
    }
    Ok(())
}
