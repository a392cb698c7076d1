//! HTTP client for the Strava OAuth and athlete endpoints.

use async_trait::async_trait;
use log::{debug, info};

use crate::config::StravaConfig;
use crate::http::{build_client, parse_response, request_error};
use crate::models::{ApiAthlete, ApiTokenResponse};
use commitpool_core::athletes::{Athlete, AthleteTokens, FitnessProviderTrait, TokenGrant};
use commitpool_core::errors::{Error, Result};

/// Strava API client.
///
/// Handles the mobile OAuth flow (code exchange, refresh, deauthorize) and
/// the authenticated athlete profile.
#[derive(Debug, Clone)]
pub struct StravaClient {
    client: reqwest::Client,
    config: StravaConfig,
}

impl StravaClient {
    pub fn new(config: StravaConfig) -> Result<Self> {
        if !config.has_credentials() {
            return Err(Error::InvalidConfigValue(
                "STRAVA_CLIENT_ID and STRAVA_CLIENT_SECRET must be set".to_string(),
            ));
        }

        Ok(Self {
            client: build_client()?,
            config,
        })
    }

    pub fn config(&self) -> &StravaConfig {
        &self.config
    }

    /// URL the user opens to grant access.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&approval_prompt=auto&scope={}",
            self.config.authorize_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(&self.config.scope),
        )
    }

    async fn token_request(&self, grant: &[(&str, &str)]) -> Result<ApiTokenResponse> {
        debug!("[Strava] POST {}", self.config.token_url);

        let mut form = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        form.extend_from_slice(grant);

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(request_error)?;

        parse_response(response).await
    }
}

#[async_trait]
impl FitnessProviderTrait for StravaClient {
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
        let response = self
            .token_request(&[("code", code), ("grant_type", "authorization_code")])
            .await?;
        info!("[Strava] Exchanged authorization code");
        Ok(response.into())
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<AthleteTokens> {
        let response = self
            .token_request(&[
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .await?;
        Ok(response.tokens())
    }

    async fn revoke(&self, access_token: &str) -> Result<()> {
        debug!("[Strava] POST {}", self.config.deauthorize_url);

        let response = self
            .client
            .post(&self.config.deauthorize_url)
            .form(&[("access_token", access_token)])
            .send()
            .await
            .map_err(request_error)?;

        parse_response::<serde_json::Value>(response).await?;
        info!("[Strava] Access revoked");
        Ok(())
    }

    async fn get_athlete(&self, access_token: &str) -> Result<Athlete> {
        let url = format!("{}/athlete", self.config.api_url);
        debug!("[Strava] GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(request_error)?;

        let athlete: ApiAthlete = parse_response(response).await?;
        Ok(athlete.into())
    }
}
