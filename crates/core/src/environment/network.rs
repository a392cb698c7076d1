//! Supported networks and their contract deployments.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ORACLE_JOB_ID, DEPOSIT_GAS_LIMIT, PROGRESS_REQUEST_GAS_LIMIT};

/// A chain the client can connect to, with the contract addresses deployed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: String,
    pub short_name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub block_explorer: String,
    pub native_token: String,
    pub spc_address: String,
    pub dai_address: String,
    pub link_address: String,
}

impl Network {
    /// Polygon mainnet.
    pub fn matic() -> Self {
        Self {
            name: "Matic Network".to_string(),
            short_name: "matic".to_string(),
            chain_id: 137,
            rpc_url: "https://polygon-rpc.com".to_string(),
            block_explorer: "https://polygonscan.com".to_string(),
            native_token: "MATIC".to_string(),
            spc_address: "0x91E17f2A995f7EB830057a2F83ADa3A50a37F20d".to_string(),
            dai_address: "0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063".to_string(),
            link_address: "0xb0897686c545045aFc77CF20eC7A532E3120E0F1".to_string(),
        }
    }

    /// Polygon Mumbai testnet.
    pub fn mumbai() -> Self {
        Self {
            name: "Mumbai Testnet".to_string(),
            short_name: "mumbai".to_string(),
            chain_id: 80001,
            rpc_url: "https://rpc-mumbai.maticvigil.com".to_string(),
            block_explorer: "https://mumbai.polygonscan.com".to_string(),
            native_token: "MATIC".to_string(),
            spc_address: "0x6B6FD55b224b25B2F56A10Ce670B097e66Fca136".to_string(),
            dai_address: "0x70d1F773A9f81C852087B77F6Ae6d3032B02D2AB".to_string(),
            link_address: "0x326C977E6efc84E512bB9C30f76E30c160eD06FB".to_string(),
        }
    }

    pub fn all() -> Vec<Network> {
        vec![Self::matic(), Self::mumbai()]
    }

    pub fn by_name(short_name: &str) -> Option<Network> {
        Self::all()
            .into_iter()
            .find(|n| n.short_name.eq_ignore_ascii_case(short_name.trim()))
    }

    pub fn by_chain_id(chain_id: u64) -> Option<Network> {
        Self::all().into_iter().find(|n| n.chain_id == chain_id)
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.block_explorer.trim_end_matches('/'), hash)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::matic()
    }
}

/// Contract call settings shared by the commitment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSettings {
    pub deposit_gas_limit: u64,
    pub progress_gas_limit: u64,
    pub oracle_job_id: String,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            deposit_gas_limit: DEPOSIT_GAS_LIMIT,
            progress_gas_limit: PROGRESS_REQUEST_GAS_LIMIT,
            oracle_job_id: DEFAULT_ORACLE_JOB_ID.to_string(),
        }
    }
}

/// Public Strava profile page for an athlete.
pub fn athlete_profile_url(athlete_id: u64) -> String {
    format!("https://www.strava.com/athletes/{}", athlete_id)
}
