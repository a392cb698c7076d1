use async_trait::async_trait;

use super::athletes_model::{Athlete, AthleteTokens, TokenGrant};
use crate::errors::Result;

/// OAuth endpoints and profile lookup of the fitness provider.
#[async_trait]
pub trait FitnessProviderTrait: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant>;

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<AthleteTokens>;

    async fn revoke(&self, access_token: &str) -> Result<()>;

    async fn get_athlete(&self, access_token: &str) -> Result<Athlete>;
}

/// Cumulative distance recorded by the provider.
#[async_trait]
pub trait ProgressSourceTrait: Send + Sync {
    async fn activity_total(
        &self,
        start_time: u64,
        end_time: u64,
        activity_type: &str,
        access_token: &str,
    ) -> Result<f64>;
}

/// Backend that remembers which athlete a token belongs to.
#[async_trait]
pub trait UserRegistryTrait: Send + Sync {
    async fn register_user(&self, address: &str, token: &str) -> Result<()>;
}

#[async_trait]
pub trait AthleteServiceTrait: Send + Sync {
    fn athlete(&self) -> Option<Athlete>;

    fn tokens(&self) -> Option<AthleteTokens>;

    fn is_linked(&self) -> bool {
        self.athlete().is_some()
    }

    /// Completes the OAuth redirect.
    async fn link_with_code(&self, code: &str) -> Result<Athlete>;

    /// Restores a link from a stored refresh token.
    async fn link_with_refresh_token(&self, refresh_token: &str) -> Result<Athlete>;

    /// A valid access token, refreshed first when close to expiry.
    async fn access_token(&self) -> Result<String>;

    async fn logout(&self) -> Result<()>;
}
