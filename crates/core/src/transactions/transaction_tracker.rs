use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::transactions_model::{PendingTransaction, TransactionStatus, TransactionType};
use crate::errors::{Result, TransactionError};

/// Latest transaction per contract method.
///
/// At most one transaction per method may be in flight. Chain transactions
/// cannot be cancelled once broadcast, so a new request for a method with an
/// outstanding one is rejected rather than queued.
#[derive(Debug, Default)]
pub struct TransactionTracker {
    entries: Mutex<HashMap<TransactionType, PendingTransaction>>,
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TransactionType, PendingTransaction>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reserves the method for a new transaction.
    pub fn begin(&self, method: TransactionType) -> Result<PendingTransaction> {
        let mut entries = self.lock();
        if entries
            .get(&method)
            .is_some_and(|tx| tx.status.is_in_flight())
        {
            warn!("Rejected duplicate {} request", method);
            return Err(TransactionError::AlreadyPending(method).into());
        }

        let tx = PendingTransaction::new(method);
        debug!("Requested {} ({})", method, tx.id);
        entries.insert(method, tx.clone());
        Ok(tx)
    }

    pub fn mark_submitted(&self, method: TransactionType, hash: &str) -> Result<PendingTransaction> {
        self.transition(method, |tx| {
            tx.hash = Some(hash.to_string());
            tx.status = TransactionStatus::Submitted;
        })
    }

    pub fn confirm(&self, method: TransactionType) -> Result<PendingTransaction> {
        let tx = self.transition(method, |tx| tx.status = TransactionStatus::Confirmed)?;
        info!("{} confirmed ({:?})", method, tx.hash);
        Ok(tx)
    }

    pub fn fail(&self, method: TransactionType, reason: &str) -> Result<PendingTransaction> {
        let tx = self.transition(method, |tx| {
            tx.status = TransactionStatus::Failed {
                reason: reason.to_string(),
            }
        })?;
        warn!("{} failed: {}", method, reason);
        Ok(tx)
    }

    fn transition<F>(&self, method: TransactionType, apply: F) -> Result<PendingTransaction>
    where
        F: FnOnce(&mut PendingTransaction),
    {
        let mut entries = self.lock();
        match entries.get_mut(&method) {
            Some(tx) if tx.status.is_in_flight() => {
                apply(tx);
                Ok(tx.clone())
            }
            _ => Err(TransactionError::NotPending(method).into()),
        }
    }

    pub fn latest(&self, method: TransactionType) -> Option<PendingTransaction> {
        self.lock().get(&method).cloned()
    }

    /// Whether the UI should show the "awaiting transaction" state for a method.
    pub fn is_awaiting(&self, method: TransactionType) -> bool {
        self.lock()
            .get(&method)
            .is_some_and(|tx| tx.status.is_in_flight())
    }

    pub fn in_flight(&self) -> Vec<PendingTransaction> {
        self.lock()
            .values()
            .filter(|tx| tx.status.is_in_flight())
            .cloned()
            .collect()
    }
}
