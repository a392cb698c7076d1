use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chain::Address;
use crate::environment::Network;

/// Account connected through the wallet provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletUser {
    pub address: Address,
    pub network: Network,
    /// Defaults to the address
    pub username: String,
    pub native_balance: Option<Decimal>,
    pub token_balance: Option<Decimal>,
}

impl WalletUser {
    pub fn new(address: impl Into<String>, network: Network) -> Self {
        let address = address.into();
        Self {
            username: address.clone(),
            address,
            network,
            native_balance: None,
            token_balance: None,
        }
    }

    /// Balance line for display, e.g. `12.50 MATIC`.
    pub fn native_balance_label(&self) -> Option<String> {
        self.native_balance
            .map(|b| format!("{} {}", b.round_dp(2), self.network.native_token))
    }
}
