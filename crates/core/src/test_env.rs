//! Mock collaborators shared by the service tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::activities::Activity;
use crate::athletes::{
    Athlete, AthleteTokens, FitnessProviderTrait, ProgressSourceTrait, TokenGrant,
    UserRegistryTrait,
};
use crate::chain::{
    Address, ChainActivity, ChainCommitmentRecord, ChainEventSourceTrait, ChainRequestParameters,
    CommitContractTrait, ContractEvent, StakeTokenTrait, TxHash, TxReceipt, WalletProviderTrait,
};
use crate::environment::Network;
use crate::errors::{ChainError, Error, ProviderError, Result};

pub const ACCOUNT: &str = "0xAbC0000000000000000000000000000000000001";
pub const CONTRACT: &str = "0x91E17f2A995f7EB830057a2F83ADa3A50a37F20d";
pub const RUN_ORACLE: &str = "0x0000000000000000000000000000000000000a11";
pub const NOW: f64 = 1_700_000_000.0;

pub fn run_activity() -> Activity {
    Activity {
        key: "0xrun".to_string(),
        name: "Run".to_string(),
        oracle: RUN_ORACLE.to_string(),
        allowed: true,
        exists: true,
    }
}

pub fn ride_activity() -> Activity {
    Activity {
        key: "0xride".to_string(),
        name: "Ride".to_string(),
        oracle: "0x0000000000000000000000000000000000000b22".to_string(),
        allowed: true,
        exists: true,
    }
}

pub fn athlete() -> Athlete {
    Athlete {
        id: 4242,
        username: Some("runner".to_string()),
        firstname: Some("Sam".to_string()),
        lastname: None,
        profile_medium: Some("https://example.com/avatar.jpg".to_string()),
    }
}

pub fn tokens(access: &str, expires_at: i64) -> AthleteTokens {
    AthleteTokens {
        access_token: access.to_string(),
        refresh_token: format!("refresh-{}", access),
        expires_at,
    }
}

// --- Contract ---

#[derive(Default)]
pub struct ContractState {
    pub record: ChainCommitmentRecord,
    pub registry: Vec<(String, ChainActivity)>,
    pub calls: Vec<String>,
    pub fail_write: Option<String>,
    pub deposits: Vec<ChainRequestParameters>,
}

#[derive(Clone, Default)]
pub struct MockContract {
    pub state: Arc<Mutex<ContractState>>,
}

impl MockContract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(activities: Vec<Activity>) -> Self {
        let contract = Self::new();
        contract.state.lock().unwrap().registry = activities
            .into_iter()
            .map(|a| {
                (
                    a.key.clone(),
                    ChainActivity {
                        name: a.name,
                        oracle: a.oracle,
                        allowed: a.allowed,
                        exists: a.exists,
                    },
                )
            })
            .collect();
        contract
    }

    pub fn set_record(&self, record: ChainCommitmentRecord) {
        self.state.lock().unwrap().record = record;
    }

    pub fn fail_write(&self, message: &str) {
        self.state.lock().unwrap().fail_write = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn write(&self, method: &str) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method.to_string());
        if let Some(message) = state.fail_write.clone() {
            return Err(ChainError::rejected(method, message).into());
        }
        Ok(format!("0xhash-{}", method))
    }
}

#[async_trait]
impl CommitContractTrait for MockContract {
    fn address(&self) -> Address {
        CONTRACT.to_string()
    }

    async fn commitments(&self, _account: &str) -> Result<ChainCommitmentRecord> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("commitments".to_string());
        Ok(state.record.clone())
    }

    async fn activities(&self, key: &str) -> Result<ChainActivity> {
        let state = self.state.lock().unwrap();
        state
            .registry
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, a)| a.clone())
            .ok_or_else(|| ChainError::rejected("activities", "unknown key").into())
    }

    async fn activity_key_list(&self, index: u32) -> Result<String> {
        let state = self.state.lock().unwrap();
        state
            .registry
            .get(index as usize)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| ChainError::rejected("activityKeyList", "invalid opcode").into())
    }

    async fn deposit_and_commit(
        &self,
        params: &ChainRequestParameters,
        _user_id: &str,
        _gas_limit: u64,
    ) -> Result<TxHash> {
        let hash = self.write("depositAndCommit")?;
        let mut state = self.state.lock().unwrap();
        state.deposits.push(params.clone());
        state.record = ChainCommitmentRecord {
            activity_key: params.activity_key.clone(),
            goal_value: params.goal_value,
            reported_value: 0,
            start_time: params.start_time,
            end_time: params.end_time,
            stake: params.stake,
            exists: true,
            met: false,
        };
        Ok(hash)
    }

    async fn process_commitment_user(&self) -> Result<TxHash> {
        let hash = self.write("processCommitmentUser")?;
        self.state.lock().unwrap().record = ChainCommitmentRecord::default();
        Ok(hash)
    }

    async fn request_activity_distance(
        &self,
        _committer: &str,
        oracle: &str,
        _job_id: &str,
        _gas_limit: u64,
    ) -> Result<TxHash> {
        self.write(&format!("requestActivityDistance:{}", oracle))
    }
}

// --- Stake token ---

#[derive(Clone, Default)]
pub struct MockToken {
    pub allowance: Arc<Mutex<u128>>,
    pub balance: Arc<Mutex<u128>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    /// Runs while the approval is pending
    pub on_approve: Arc<Mutex<Option<Arc<dyn Fn() + Send + Sync>>>>,
}

impl MockToken {
    pub fn on_approve(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_approve.lock().unwrap() = Some(Arc::new(hook));
    }
}

#[async_trait]
impl StakeTokenTrait for MockToken {
    async fn allowance(&self, _owner: &str, _spender: &str) -> Result<u128> {
        Ok(*self.allowance.lock().unwrap())
    }

    async fn approve(&self, _spender: &str, amount: u128) -> Result<TxHash> {
        self.calls.lock().unwrap().push("approve".to_string());
        let hook = self.on_approve.lock().unwrap().clone();
        if let Some(hook) = hook {
            hook();
        }
        *self.allowance.lock().unwrap() = amount;
        Ok("0xhash-approve".to_string())
    }

    async fn balance_of(&self, _owner: &str) -> Result<u128> {
        Ok(*self.balance.lock().unwrap())
    }
}

// --- Wallet provider ---

#[derive(Clone)]
pub struct MockProvider {
    pub address: Arc<Mutex<Option<Address>>>,
    pub native_balance: u128,
    pub revert: Arc<Mutex<bool>>,
}

impl MockProvider {
    pub fn connected() -> Self {
        Self {
            address: Arc::new(Mutex::new(Some(ACCOUNT.to_string()))),
            native_balance: 0,
            revert: Arc::new(Mutex::new(false)),
        }
    }

    pub fn disconnected() -> Self {
        let provider = Self::connected();
        *provider.address.lock().unwrap() = None;
        provider
    }

    pub fn revert_all(&self) {
        *self.revert.lock().unwrap() = true;
    }
}

#[async_trait]
impl WalletProviderTrait for MockProvider {
    fn address(&self) -> Option<Address> {
        self.address.lock().unwrap().clone()
    }

    fn network(&self) -> Network {
        Network::mumbai()
    }

    async fn native_balance(&self, _account: &str) -> Result<u128> {
        Ok(self.native_balance)
    }

    async fn wait_for_receipt(&self, hash: &str) -> Result<TxReceipt> {
        Ok(TxReceipt {
            hash: hash.to_string(),
            success: !*self.revert.lock().unwrap(),
            block_number: Some(1),
        })
    }
}

// --- Contract events ---

pub struct MockEventSource {
    pub sender: broadcast::Sender<ContractEvent>,
}

impl MockEventSource {
    pub fn new() -> Self {
        let (sender, _receiver) = broadcast::channel(16);
        Self { sender }
    }
}

impl ChainEventSourceTrait for MockEventSource {
    fn subscribe(&self) -> broadcast::Receiver<ContractEvent> {
        self.sender.subscribe()
    }
}

// --- Fitness provider ---

#[derive(Clone, Default)]
pub struct MockFitnessProvider {
    pub grant_athlete: Option<Athlete>,
    pub refreshed: Arc<Mutex<Vec<String>>>,
    pub revoked: Arc<Mutex<Vec<String>>>,
    pub fail_revoke: bool,
    pub next_expiry: i64,
}

#[async_trait]
impl FitnessProviderTrait for MockFitnessProvider {
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
        if code.is_empty() {
            return Err(ProviderError::Api {
                status: 400,
                message: "Bad Request".to_string(),
            }
            .into());
        }
        Ok(TokenGrant {
            tokens: tokens(&format!("access-{}", code), self.next_expiry),
            athlete: self.grant_athlete.clone(),
        })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<AthleteTokens> {
        let mut refreshed = self.refreshed.lock().unwrap();
        refreshed.push(refresh_token.to_string());
        Ok(tokens(
            &format!("access-refreshed-{}", refreshed.len()),
            self.next_expiry,
        ))
    }

    async fn revoke(&self, access_token: &str) -> Result<()> {
        if self.fail_revoke {
            return Err(ProviderError::Request("connection reset".to_string()).into());
        }
        self.revoked.lock().unwrap().push(access_token.to_string());
        Ok(())
    }

    async fn get_athlete(&self, _access_token: &str) -> Result<Athlete> {
        Ok(athlete())
    }
}

// --- Progress endpoint and user registry ---

#[derive(Clone, Default)]
pub struct MockProgressApi {
    pub total: Arc<Mutex<f64>>,
    pub queries: Arc<Mutex<Vec<(u64, u64, String, String)>>>,
    pub registered: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_registry: bool,
}

#[async_trait]
impl ProgressSourceTrait for MockProgressApi {
    async fn activity_total(
        &self,
        start_time: u64,
        end_time: u64,
        activity_type: &str,
        access_token: &str,
    ) -> Result<f64> {
        self.queries.lock().unwrap().push((
            start_time,
            end_time,
            activity_type.to_string(),
            access_token.to_string(),
        ));
        Ok(*self.total.lock().unwrap())
    }
}

#[async_trait]
impl UserRegistryTrait for MockProgressApi {
    async fn register_user(&self, address: &str, token: &str) -> Result<()> {
        if self.fail_registry {
            return Err(Error::Provider(ProviderError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            }));
        }
        self.registered
            .lock()
            .unwrap()
            .push((address.to_string(), token.to_string()));
        Ok(())
    }
}
