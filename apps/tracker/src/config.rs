use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Context};
use commitpool_core::environment::Network;

pub struct Config {
    pub network: Network,
    pub poll_interval: Duration,
    pub token_file: PathBuf,
    pub commitment_file: PathBuf,
    /// One-off OAuth code to link a new athlete
    pub auth_code: Option<String>,
    /// Revoke the stored link and exit
    pub logout: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let network_name = std::env::var("CP_NETWORK").unwrap_or_else(|_| "matic".into());
        let network = Network::by_name(&network_name)
            .ok_or_else(|| anyhow!("Unknown CP_NETWORK '{}'", network_name))?;

        let poll_secs: u64 = std::env::var("CP_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .context("Invalid CP_POLL_INTERVAL_SECS")?;
        if poll_secs == 0 {
            return Err(anyhow!("CP_POLL_INTERVAL_SECS must be greater than zero"));
        }

        let token_file = std::env::var("CP_TOKEN_FILE").unwrap_or_else(|_| "./data/tokens.json".into());
        let commitment_file =
            std::env::var("CP_COMMITMENT_FILE").unwrap_or_else(|_| "./data/commitment.json".into());
        let auth_code = std::env::var("CP_AUTH_CODE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let logout = std::env::var("CP_LOGOUT")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            network,
            poll_interval: Duration::from_secs(poll_secs),
            token_file: PathBuf::from(token_file),
            commitment_file: PathBuf::from(commitment_file),
            auth_code,
            logout,
        })
    }
}
