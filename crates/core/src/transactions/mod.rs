//! Transactions module - per-method tracking of contract writes.

mod transaction_tracker;
mod transactions_model;

pub use transaction_tracker::TransactionTracker;
pub use transactions_model::{PendingTransaction, TransactionStatus, TransactionType};
