use std::sync::Arc;

use anyhow::{anyhow, Context};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use commitpool_core::athletes::{AthleteService, AthleteServiceTrait};
use commitpool_core::commitments::normalizer::from_chain_record;
use commitpool_core::commitments::{CommitmentStore, TrackingService};
use commitpool_core::environment::athlete_profile_url;
use commitpool_core::utils::time_utils::format_timestamp;
use commitpool_core::utils::SystemClock;
use commitpool_strava::{ProgressApiClient, StravaClient, StravaConfig};

use crate::config::Config;
use crate::snapshot::CommitmentSnapshot;
use crate::token_store::{StoredToken, TokenStore};

pub struct AppState {
    pub store: CommitmentStore,
    pub athletes: Arc<AthleteService>,
    pub tracking: TrackingService,
    pub token_store: TokenStore,
}

impl AppState {
    /// Writes the current refresh token back to disk so a restart can
    /// resume without a new authorization.
    pub fn persist_tokens(&self) {
        let (Some(athlete), Some(tokens)) = (self.athletes.athlete(), self.athletes.tokens()) else {
            return;
        };
        let token = StoredToken {
            athlete_id: athlete.id,
            refresh_token: tokens.refresh_token,
        };
        match self.token_store.load() {
            Ok(Some(stored)) if stored == token => {}
            _ => {
                if let Err(e) = self.token_store.save(Some(token)) {
                    tracing::warn!("Failed to persist refresh token: {}", e);
                }
            }
        }
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("CP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

struct Clients {
    strava: Arc<StravaClient>,
    progress_api: Arc<ProgressApiClient>,
    athletes: Arc<AthleteService>,
    clock: Arc<SystemClock>,
}

fn build_clients() -> anyhow::Result<Clients> {
    let strava_config = StravaConfig::from_env();
    let strava = Arc::new(StravaClient::new(strava_config.clone())?);
    let progress_api = Arc::new(ProgressApiClient::new(&strava_config.progress_api_url)?);
    let clock = Arc::new(SystemClock);
    let athletes = Arc::new(AthleteService::new(
        strava.clone(),
        progress_api.clone(),
        clock.clone(),
    ));
    Ok(Clients {
        strava,
        progress_api,
        athletes,
        clock,
    })
}

/// Revokes the stored Strava link and forgets the refresh token.
pub async fn logout(config: &Config) -> anyhow::Result<()> {
    let token_store = TokenStore::new(config.token_file.clone());
    let Some(stored) = token_store.load()? else {
        tracing::info!("No Strava account linked");
        return Ok(());
    };

    let clients = build_clients()?;
    match clients
        .athletes
        .link_with_refresh_token(&stored.refresh_token)
        .await
    {
        Ok(_) => clients.athletes.logout().await?,
        Err(e) => tracing::warn!("Stored refresh token already invalid: {}", e),
    }
    token_store.clear()?;
    tracing::info!("Unlinked Strava athlete {}", stored.athlete_id);
    Ok(())
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let Clients {
        strava,
        progress_api,
        athletes,
        clock,
    } = build_clients()?;
    let token_store = TokenStore::new(config.token_file.clone());

    if let Some(code) = config.auth_code.as_deref() {
        athletes.link_with_code(code).await?;
    } else if let Some(stored) = token_store.load()? {
        athletes
            .link_with_refresh_token(&stored.refresh_token)
            .await
            .context("Stored refresh token was rejected")?;
    } else {
        return Err(anyhow!(
            "No Strava account linked. Authorize at {} and set CP_AUTH_CODE",
            strava.authorize_url()
        ));
    }
    if let Some(athlete) = athletes.athlete() {
        tracing::info!(
            "Linked Strava athlete {} ({})",
            athlete.display_name(),
            athlete_profile_url(athlete.id)
        );
    }

    let snapshot = CommitmentSnapshot::load(&config.commitment_file)?;
    let store = CommitmentStore::new(clock);
    store.set_catalog(vec![snapshot.activity.clone()]);
    let commitment = store.merge_chain_record(from_chain_record(&snapshot.record));
    tracing::info!(
        "Tracking {} {} of {} on {} from {} to {}",
        commitment.goal_value.unwrap_or_default(),
        commitment.unit.as_deref().unwrap_or_default(),
        snapshot.activity.name,
        config.network.name,
        commitment
            .start_time
            .and_then(|t| format_timestamp(t, &chrono::Local))
            .unwrap_or_default(),
        commitment
            .end_time
            .and_then(|t| format_timestamp(t, &chrono::Local))
            .unwrap_or_default(),
    );

    let tracking = TrackingService::new(progress_api, athletes.clone(), store.clone());
    let state = Arc::new(AppState {
        store,
        athletes,
        tracking,
        token_store,
    });
    state.persist_tokens();
    Ok(state)
}
