use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::{Arc, RwLock};

use super::athletes_model::{Athlete, AthleteTokens, LinkedAthlete};
use super::athletes_traits::{AthleteServiceTrait, FitnessProviderTrait, UserRegistryTrait};
use crate::constants::TOKEN_REFRESH_MARGIN_SECS;
use crate::errors::{ProviderError, Result};
use crate::utils::Clock;

/// Holds the linked fitness identity and keeps its access token fresh.
pub struct AthleteService {
    provider: Arc<dyn FitnessProviderTrait>,
    registry: Arc<dyn UserRegistryTrait>,
    clock: Arc<dyn Clock>,
    linked: RwLock<Option<LinkedAthlete>>,
}

impl AthleteService {
    pub fn new(
        provider: Arc<dyn FitnessProviderTrait>,
        registry: Arc<dyn UserRegistryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            registry,
            clock,
            linked: RwLock::new(None),
        }
    }

    fn linked(&self) -> Option<LinkedAthlete> {
        self.linked
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_linked(&self, value: Option<LinkedAthlete>) {
        *self.linked.write().unwrap_or_else(|e| e.into_inner()) = value;
    }

    fn store_tokens(&self, tokens: AthleteTokens) {
        let mut linked = self.linked.write().unwrap_or_else(|e| e.into_inner());
        if let Some(linked) = linked.as_mut() {
            linked.tokens = tokens;
        }
    }

    /// Persists the identity with the user registry. Failures are logged
    /// and never reach the caller.
    async fn register(&self, athlete: &Athlete, tokens: &AthleteTokens) {
        let address = athlete.id.to_string();
        match self
            .registry
            .register_user(&address, &tokens.refresh_token)
            .await
        {
            Ok(()) => debug!("Registered athlete {} with user registry", athlete.id),
            Err(e) => warn!("Failed to register athlete {}: {}", athlete.id, e),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AthleteTokens> {
        let tokens = self.provider.refresh_access_token(refresh_token).await?;
        self.store_tokens(tokens.clone());
        debug!("Refreshed access token, expires at {}", tokens.expires_at);
        Ok(tokens)
    }
}

#[async_trait]
impl AthleteServiceTrait for AthleteService {
    fn athlete(&self) -> Option<Athlete> {
        self.linked().map(|l| l.athlete)
    }

    fn tokens(&self) -> Option<AthleteTokens> {
        self.linked().map(|l| l.tokens)
    }

    async fn link_with_code(&self, code: &str) -> Result<Athlete> {
        let grant = self.provider.exchange_code(code).await?;
        let athlete = match grant.athlete {
            Some(athlete) => athlete,
            None => self.provider.get_athlete(&grant.tokens.access_token).await?,
        };

        info!("Linked athlete {}", athlete.id);
        self.set_linked(Some(LinkedAthlete {
            athlete: athlete.clone(),
            tokens: grant.tokens.clone(),
        }));
        self.register(&athlete, &grant.tokens).await;
        Ok(athlete)
    }

    async fn link_with_refresh_token(&self, refresh_token: &str) -> Result<Athlete> {
        let tokens = self.provider.refresh_access_token(refresh_token).await?;
        let athlete = self.provider.get_athlete(&tokens.access_token).await?;

        info!("Restored link for athlete {}", athlete.id);
        self.set_linked(Some(LinkedAthlete {
            athlete: athlete.clone(),
            tokens,
        }));
        Ok(athlete)
    }

    async fn access_token(&self) -> Result<String> {
        let linked = self.linked().ok_or(ProviderError::NotLinked)?;
        let now = self.clock.now_seconds().floor() as i64;

        if linked.tokens.expires_within(now, TOKEN_REFRESH_MARGIN_SECS) {
            let tokens = self.refresh(&linked.tokens.refresh_token).await?;
            return Ok(tokens.access_token);
        }
        Ok(linked.tokens.access_token)
    }

    async fn logout(&self) -> Result<()> {
        let Some(linked) = self.linked() else {
            return Ok(());
        };
        self.provider.revoke(&linked.tokens.access_token).await?;
        self.set_linked(None);
        info!("Unlinked athlete {}", linked.athlete.id);
        Ok(())
    }
}
