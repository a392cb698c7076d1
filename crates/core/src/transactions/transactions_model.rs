//! Pending transaction models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chain::TxHash;

/// Contract writes issued by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    Approve,
    DepositAndCommit,
    RequestActivityDistance,
    ProcessCommitmentUser,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::DepositAndCommit => "depositAndCommit",
            Self::RequestActivityDistance => "requestActivityDistance",
            Self::ProcessCommitmentUser => "processCommitmentUser",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Sent to the wallet, no hash yet.
    Requested,
    /// Acknowledged by the provider.
    Submitted,
    Confirmed,
    Failed { reason: String },
}

impl TransactionStatus {
    /// Whether the transaction is still outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Requested | Self::Submitted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    pub id: Uuid,
    pub method: TransactionType,
    pub hash: Option<TxHash>,
    pub status: TransactionStatus,
    pub requested_at: DateTime<Utc>,
}

impl PendingTransaction {
    pub fn new(method: TransactionType) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            hash: None,
            status: TransactionStatus::Requested,
            requested_at: Utc::now(),
        }
    }
}
