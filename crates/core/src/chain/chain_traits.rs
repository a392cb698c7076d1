use async_trait::async_trait;
use tokio::sync::broadcast;

use super::chain_model::{
    Address, ChainActivity, ChainCommitmentRecord, ChainRequestParameters, ContractEvent, TxHash,
    TxReceipt,
};
use crate::environment::Network;
use crate::errors::Result;

/// Signer-bound handle to the SinglePlayerCommit contract.
///
/// Write methods resolve once the provider has acknowledged the transaction
/// (it has a hash); confirmation is awaited separately through
/// [`WalletProviderTrait::wait_for_receipt`].
#[async_trait]
pub trait CommitContractTrait: Send + Sync {
    fn address(&self) -> Address;

    async fn commitments(&self, account: &str) -> Result<ChainCommitmentRecord>;

    async fn activities(&self, key: &str) -> Result<ChainActivity>;

    /// Fails once `index` is past the end of the registry.
    async fn activity_key_list(&self, index: u32) -> Result<String>;

    async fn deposit_and_commit(
        &self,
        params: &ChainRequestParameters,
        user_id: &str,
        gas_limit: u64,
    ) -> Result<TxHash>;

    async fn process_commitment_user(&self) -> Result<TxHash>;

    async fn request_activity_distance(
        &self,
        committer: &str,
        oracle: &str,
        job_id: &str,
        gas_limit: u64,
    ) -> Result<TxHash>;
}

/// ERC-20 token used for stakes.
#[async_trait]
pub trait StakeTokenTrait: Send + Sync {
    async fn allowance(&self, owner: &str, spender: &str) -> Result<u128>;

    async fn approve(&self, spender: &str, amount: u128) -> Result<TxHash>;

    async fn balance_of(&self, owner: &str) -> Result<u128>;
}

/// Connected wallet provider.
#[async_trait]
pub trait WalletProviderTrait: Send + Sync {
    /// Selected account, `None` until the user connects.
    fn address(&self) -> Option<Address>;

    fn network(&self) -> Network;

    async fn native_balance(&self, account: &str) -> Result<u128>;

    async fn wait_for_receipt(&self, hash: &str) -> Result<TxReceipt>;
}

/// Source of contract log events.
pub trait ChainEventSourceTrait: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<ContractEvent>;
}
