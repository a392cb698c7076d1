//! Wallet module - connected account and balances.

mod wallet_model;
mod wallet_service;


pub use wallet_model::WalletUser;
pub use wallet_service::{WalletService, WalletServiceTrait};
