//! Wire types of the Strava and progress APIs.

use serde::{Deserialize, Serialize};

use commitpool_core::athletes::{Athlete, AthleteTokens, TokenGrant};

/// Body of `POST /oauth/token` for both grant types.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    #[serde(default)]
    pub athlete: Option<ApiAthlete>,
}

impl ApiTokenResponse {
    pub fn tokens(&self) -> AthleteTokens {
        AthleteTokens {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_at: self.expires_at,
        }
    }
}

impl From<ApiTokenResponse> for TokenGrant {
    fn from(response: ApiTokenResponse) -> Self {
        TokenGrant {
            tokens: response.tokens(),
            athlete: response.athlete.map(Athlete::from),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiAthlete {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub profile_medium: Option<String>,
}

impl From<ApiAthlete> for Athlete {
    fn from(athlete: ApiAthlete) -> Self {
        Athlete {
            id: athlete.id,
            username: athlete.username,
            firstname: athlete.firstname,
            lastname: athlete.lastname,
            profile_medium: athlete.profile_medium,
        }
    }
}

/// Error body returned by both APIs.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiProgressResponse {
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterUserRequest<'a> {
    pub address: &'a str,
    pub token: &'a str,
}
