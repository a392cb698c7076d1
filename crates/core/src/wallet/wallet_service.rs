use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::wallet_model::WalletUser;
use crate::chain::{StakeTokenTrait, WalletProviderTrait};
use crate::commitments::normalizer::from_base_units;
use crate::errors::{ChainError, Result};

#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    /// The connected account, `None` when no wallet is connected.
    fn connected_address(&self) -> Option<String>;

    /// Builds the wallet user with native and stake-token balances.
    async fn load_user(&self) -> Result<WalletUser>;
}

pub struct WalletService {
    provider: Arc<dyn WalletProviderTrait>,
    token: Arc<dyn StakeTokenTrait>,
}

impl WalletService {
    pub fn new(provider: Arc<dyn WalletProviderTrait>, token: Arc<dyn StakeTokenTrait>) -> Self {
        Self { provider, token }
    }
}

#[async_trait]
impl WalletServiceTrait for WalletService {
    fn connected_address(&self) -> Option<String> {
        self.provider.address().filter(|a| !a.is_empty())
    }

    async fn load_user(&self) -> Result<WalletUser> {
        let address = self
            .connected_address()
            .ok_or(ChainError::WalletNotConnected)?;

        let (native, token) = futures::try_join!(
            self.provider.native_balance(&address),
            self.token.balance_of(&address)
        )?;
        debug!("Loaded balances for {}", address);

        let mut user = WalletUser::new(address, self.provider.network());
        user.native_balance = from_base_units(native);
        user.token_balance = from_base_units(token);
        Ok(user)
    }
}
