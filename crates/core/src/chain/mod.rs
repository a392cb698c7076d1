//! Chain module - contract records, events and the wallet/contract seams.

mod chain_model;
mod chain_traits;

pub use chain_model::*;
pub use chain_traits::{
    ChainEventSourceTrait, CommitContractTrait, StakeTokenTrait, WalletProviderTrait,
};
