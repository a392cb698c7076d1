//! Raw values exchanged with the SinglePlayerCommit contract.

use serde::{Deserialize, Serialize};

/// Hex-encoded account or contract address.
pub type Address = String;

/// Hex-encoded transaction hash.
pub type TxHash = String;

/// Compares two addresses ignoring hex case.
pub fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Commitment as returned by `commitments(address)`.
///
/// Distances are hundredths of a mile and the stake is in token base units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCommitmentRecord {
    pub activity_key: String,
    pub goal_value: u128,
    pub reported_value: u128,
    pub start_time: u64,
    pub end_time: u64,
    pub stake: u128,
    pub exists: bool,
    pub met: bool,
}

/// Activity registry entry as returned by `activities(key)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainActivity {
    pub name: String,
    pub oracle: Address,
    pub allowed: bool,
    pub exists: bool,
}

/// Integer arguments for `depositAndCommit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRequestParameters {
    pub activity_key: String,
    pub goal_value: u128,
    pub start_time: u64,
    pub end_time: u64,
    pub stake: u128,
    pub deposit_amount: u128,
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub hash: TxHash,
    pub success: bool,
    pub block_number: Option<u64>,
}

/// Contract log events the client reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContractEvent {
    /// Oracle reported a new distance for a committer.
    RequestActivityDistanceFulfilled {
        id: String,
        distance: u128,
        committer: Address,
    },

    /// Commitment was settled on-chain.
    CommitmentEnded {
        committer: Address,
        met: bool,
        amount_penalized: u128,
    },
}

impl ContractEvent {
    pub fn committer(&self) -> &str {
        match self {
            Self::RequestActivityDistanceFulfilled { committer, .. } => committer,
            Self::CommitmentEnded { committer, .. } => committer,
        }
    }
}
