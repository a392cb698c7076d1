//! Endpoints and credentials for the Strava and progress API clients.

pub const DEFAULT_AUTHORIZE_URL: &str = "https://www.strava.com/oauth/mobile/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
pub const DEFAULT_DEAUTHORIZE_URL: &str = "https://www.strava.com/oauth/deauthorize";
pub const DEFAULT_API_URL: &str = "https://www.strava.com/api/v3";
pub const DEFAULT_PROGRESS_API_URL: &str = "https://test2.dcl.properties";
pub const DEFAULT_REDIRECT_URI: &str = "commitpool://redirect";
pub const DEFAULT_SCOPE: &str = "read,activity:read";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StravaConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub deauthorize_url: String,
    pub api_url: String,
    /// Base of the `/activities` and `/user` endpoints
    pub progress_api_url: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl Default for StravaConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            deauthorize_url: DEFAULT_DEAUTHORIZE_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            progress_api_url: DEFAULT_PROGRESS_API_URL.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

fn env_url(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_string(key: &str) -> String {
    std::env::var(key)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

impl StravaConfig {
    /// Reads `STRAVA_*` and `COMMITPOOL_API_URL`, falling back to the public
    /// endpoints.
    pub fn from_env() -> Self {
        Self {
            client_id: env_string("STRAVA_CLIENT_ID"),
            client_secret: env_string("STRAVA_CLIENT_SECRET"),
            authorize_url: env_url("STRAVA_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL),
            token_url: env_url("STRAVA_TOKEN_URL", DEFAULT_TOKEN_URL),
            deauthorize_url: env_url("STRAVA_DEAUTHORIZE_URL", DEFAULT_DEAUTHORIZE_URL),
            api_url: env_url("STRAVA_API_URL", DEFAULT_API_URL),
            progress_api_url: env_url("COMMITPOOL_API_URL", DEFAULT_PROGRESS_API_URL),
            redirect_uri: env_url("STRAVA_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}
