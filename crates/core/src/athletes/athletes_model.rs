//! Fitness-provider identity models.

use serde::{Deserialize, Serialize};

/// Athlete profile returned by the fitness provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: u64,
    pub username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    /// Medium-size avatar URL
    pub profile_medium: Option<String>,
}

impl Athlete {
    /// First name, falling back to the username.
    pub fn display_name(&self) -> String {
        self.firstname
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| format!("athlete {}", self.id))
    }
}

/// OAuth tokens for a linked athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
}

impl AthleteTokens {
    pub fn expires_within(&self, now: i64, margin_secs: i64) -> bool {
        self.expires_at <= now + margin_secs
    }
}

/// Tokens issued by an authorization-code exchange. The provider includes the
/// athlete summary when it can.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub tokens: AthleteTokens,
    pub athlete: Option<Athlete>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAthlete {
    pub athlete: Athlete,
    pub tokens: AthleteTokens,
}
