use async_trait::async_trait;
use log::{debug, info};
use std::future::Future;
use std::sync::Arc;

use super::commitments_model::CommitmentDraft;
use super::commitments_traits::CommitmentServiceTrait;
use super::normalizer::{from_chain_record, to_chain_request};
use super::store::CommitmentStore;
use super::validation::unmet_requirements;
use crate::activities::find_activity;
use crate::chain::{
    CommitContractTrait, StakeTokenTrait, TxHash, TxReceipt, WalletProviderTrait,
};
use crate::environment::ChainSettings;
use crate::errors::{Error, Result, TransactionError, ValidationError};
use crate::transactions::{TransactionTracker, TransactionType};

pub struct CommitmentService {
    contract: Arc<dyn CommitContractTrait>,
    token: Arc<dyn StakeTokenTrait>,
    provider: Arc<dyn WalletProviderTrait>,
    store: CommitmentStore,
    tracker: Arc<TransactionTracker>,
    settings: ChainSettings,
}

impl CommitmentService {
    pub fn new(
        contract: Arc<dyn CommitContractTrait>,
        token: Arc<dyn StakeTokenTrait>,
        provider: Arc<dyn WalletProviderTrait>,
        store: CommitmentStore,
        tracker: Arc<TransactionTracker>,
        settings: ChainSettings,
    ) -> Self {
        Self {
            contract,
            token,
            provider,
            store,
            tracker,
            settings,
        }
    }

    pub fn tracker(&self) -> &Arc<TransactionTracker> {
        &self.tracker
    }

    /// Sends one contract write and follows it to confirmation.
    ///
    /// Returns only after the receipt is in, so a dependent call issued
    /// afterwards can never race this one.
    async fn run_write<F, Fut>(&self, method: TransactionType, send: F) -> Result<TxReceipt>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<TxHash>> + Send,
    {
        self.tracker.begin(method)?;

        let hash = match send().await {
            Ok(hash) => hash,
            Err(e) => {
                self.tracker.fail(method, &e.to_string())?;
                return Err(e);
            }
        };
        self.tracker.mark_submitted(method, &hash)?;
        debug!("{} submitted: {}", method, hash);

        let receipt = match self.provider.wait_for_receipt(&hash).await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.tracker.fail(method, &e.to_string())?;
                return Err(e);
            }
        };

        if !receipt.success {
            let reason = "transaction reverted".to_string();
            self.tracker.fail(method, &reason)?;
            return Err(TransactionError::Failed { method, reason }.into());
        }

        self.tracker.confirm(method)?;
        Ok(receipt)
    }

    fn require_commitment(&self) -> Result<CommitmentDraft> {
        let draft = self.store.snapshot();
        if !draft.exists {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "No commitment found for this account".to_string(),
            )));
        }
        Ok(draft)
    }
}

#[async_trait]
impl CommitmentServiceTrait for CommitmentService {
    fn store(&self) -> &CommitmentStore {
        &self.store
    }

    async fn refresh_commitment(&self, account: &str) -> Result<CommitmentDraft> {
        debug!("Checking for commitment of account {}", account);
        let record = self.contract.commitments(account).await?;
        let commitment = self.store.merge_chain_record(from_chain_record(&record));
        debug!(
            "Commitment for {}: exists={}, met={}",
            account, commitment.exists, commitment.met
        );
        Ok(commitment)
    }

    async fn create_commitment(&self, account: &str, user_id: &str) -> Result<TxReceipt> {
        if self.tracker.is_awaiting(TransactionType::DepositAndCommit) {
            return Err(TransactionError::AlreadyPending(TransactionType::DepositAndCommit).into());
        }

        let draft = self.store.snapshot();
        let catalog = self.store.catalog();
        let unmet = unmet_requirements(&draft, catalog.activities(), self.store.now());
        if !unmet.is_empty() {
            return Err(ValidationError::InvalidCommitment(unmet).into());
        }

        let params = to_chain_request(&draft)?;
        let spender = self.contract.address();
        let allowance = self.token.allowance(account, &spender).await?;

        if allowance < params.stake {
            info!(
                "Allowance {} below stake {}, requesting approval",
                allowance, params.stake
            );
            self.run_write(TransactionType::Approve, || {
                self.token.approve(&spender, params.stake)
            })
            .await?;

            // The draft may have been edited while the approval was mined.
            let latest = self.store.snapshot();
            let catalog = self.store.catalog();
            let unmet = unmet_requirements(&latest, catalog.activities(), self.store.now());
            if !unmet.is_empty() {
                return Err(ValidationError::InvalidCommitment(unmet).into());
            }
            if to_chain_request(&latest)? != params {
                return Err(ValidationError::InvalidInput(
                    "Commitment changed while awaiting approval".to_string(),
                )
                .into());
            }
        }

        let gas_limit = self.settings.deposit_gas_limit;
        let receipt = self
            .run_write(TransactionType::DepositAndCommit, || {
                self.contract.deposit_and_commit(&params, user_id, gas_limit)
            })
            .await?;
        info!("Commitment created for {} in {}", account, receipt.hash);

        self.refresh_commitment(account).await?;
        Ok(receipt)
    }

    async fn request_progress_update(&self, account: &str) -> Result<TxReceipt> {
        let commitment = self.require_commitment()?;
        let key = commitment.activity_key.unwrap_or_default();
        let oracle = find_activity(&key, self.store.catalog().activities())
            .map(|a| a.oracle.clone())
            .ok_or_else(|| ValidationError::UnknownActivity(key.clone()))?;

        let job_id = self.settings.oracle_job_id.as_str();
        let gas_limit = self.settings.progress_gas_limit;
        let receipt = self
            .run_write(TransactionType::RequestActivityDistance, || {
                self.contract
                    .request_activity_distance(account, &oracle, job_id, gas_limit)
            })
            .await?;

        self.refresh_commitment(account).await?;
        Ok(receipt)
    }

    async fn process_commitment(&self, account: &str) -> Result<TxReceipt> {
        self.require_commitment()?;
        let receipt = self
            .run_write(TransactionType::ProcessCommitmentUser, || {
                self.contract.process_commitment_user()
            })
            .await?;
        info!("Commitment processed for {}", account);

        self.refresh_commitment(account).await?;
        Ok(receipt)
    }
}
