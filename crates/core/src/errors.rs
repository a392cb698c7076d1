//! Core error types for CommitPool.
//!
//! Validation, normalization and progress helpers never return these; they
//! report through booleans and derived values. Errors come from the external
//! collaborators (wallet, contract, fitness provider) and from submission
//! attempts that fail their preconditions.

use thiserror::Error;

use crate::commitments::Requirement;
use crate::transactions::TransactionType;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the commitment client.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Contract call failed: {0}")]
    Chain(#[from] ChainError),

    #[error("Fitness provider request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and submission requests.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Commitment request is incomplete: {}", describe_requirements(.0))]
    InvalidCommitment(Vec<Requirement>),

    #[error("Activity '{0}' is not in the catalog")]
    UnknownActivity(String),
}

/// Failures reported by the wallet or contract layer.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("No wallet connected")]
    WalletNotConnected,

    #[error("Contract call '{method}' was rejected: {message}")]
    CallRejected { method: String, message: String },
}

/// Failures reported by the fitness provider or the progress/user APIs.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No fitness account linked")]
    NotLinked,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Errors raised by the pending-transaction tracker.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("A {0} transaction is already awaiting confirmation")]
    AlreadyPending(TransactionType),

    #[error("No pending {0} transaction")]
    NotPending(TransactionType),

    #[error("{method} transaction failed: {reason}")]
    Failed {
        method: TransactionType,
        reason: String,
    },
}

impl ChainError {
    pub fn rejected(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CallRejected {
            method: method.into(),
            message: message.into(),
        }
    }
}

fn describe_requirements(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(|r| r.message())
        .collect::<Vec<_>>()
        .join("; ")
}
