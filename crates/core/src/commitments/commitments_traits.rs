use async_trait::async_trait;

use super::commitments_model::CommitmentDraft;
use super::store::CommitmentStore;
use crate::chain::TxReceipt;
use crate::errors::Result;

/// Contract-facing operations on the account's commitment.
///
/// Every write is validated against the latest draft snapshot before it is
/// issued, tracked per method, and followed by a refresh from the contract
/// once confirmed. The draft is only written after a call fully resolves.
#[async_trait]
pub trait CommitmentServiceTrait: Send + Sync {
    fn store(&self) -> &CommitmentStore;

    /// Reads `commitments(account)` and merges it into the store.
    async fn refresh_commitment(&self, account: &str) -> Result<CommitmentDraft>;

    /// Approves the stake if needed, then calls `depositAndCommit`.
    async fn create_commitment(&self, account: &str, user_id: &str) -> Result<TxReceipt>;

    /// Asks the activity's oracle to report the distance covered so far.
    async fn request_progress_update(&self, account: &str) -> Result<TxReceipt>;

    /// Settles the commitment.
    async fn process_commitment(&self, account: &str) -> Result<TxReceipt>;
}
