use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::session_model::{EventSubscription, SessionUpdate};
use crate::activities::ActivityCatalogServiceTrait;
use crate::athletes::AthleteServiceTrait;
use crate::chain::{same_address, ChainEventSourceTrait, ContractEvent};
use crate::commitments::validation::unmet_requirements;
use crate::commitments::{CommitmentServiceTrait, CommitmentStore};
use crate::errors::{ChainError, Error, ProviderError, Result, TransactionError};
use crate::routing::{
    confirm_gate, evaluate_track, next_screen, on_next, resolve, FunnelSignals, Notice,
    RouteDecision, Screen, TrackOutcome,
};
use crate::transactions::TransactionType;
use crate::wallet::WalletServiceTrait;

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// One user's pass through the commitment funnel.
///
/// Ties the wallet, the linked fitness account and the commitment store
/// together and answers the routing question for any screen. Owns at most
/// one contract-event subscription, released on [`teardown`](Self::teardown)
/// or drop.
pub struct CommitPoolSession {
    wallet: Arc<dyn WalletServiceTrait>,
    athletes: Arc<dyn AthleteServiceTrait>,
    catalog: Arc<dyn ActivityCatalogServiceTrait>,
    commitments: Arc<dyn CommitmentServiceTrait>,
    updates: broadcast::Sender<SessionUpdate>,
    subscription: Mutex<Option<EventSubscription>>,
}

impl CommitPoolSession {
    pub fn new(
        wallet: Arc<dyn WalletServiceTrait>,
        athletes: Arc<dyn AthleteServiceTrait>,
        catalog: Arc<dyn ActivityCatalogServiceTrait>,
        commitments: Arc<dyn CommitmentServiceTrait>,
    ) -> Self {
        let (updates, _receiver) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            wallet,
            athletes,
            catalog,
            commitments,
            updates,
            subscription: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &CommitmentStore {
        self.commitments.store()
    }

    pub fn subscribe_updates(&self) -> broadcast::Receiver<SessionUpdate> {
        self.updates.subscribe()
    }

    fn publish(&self, update: SessionUpdate) {
        // No listener is fine.
        let _ = self.updates.send(update);
    }

    fn subscription(&self) -> MutexGuard<'_, Option<EventSubscription>> {
        self.subscription.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn account(&self) -> Result<String> {
        self.wallet
            .connected_address()
            .ok_or_else(|| ChainError::WalletNotConnected.into())
    }

    pub fn signals(&self) -> FunnelSignals {
        let commitment = self.store().snapshot();
        FunnelSignals {
            wallet_connected: self.wallet.connected_address().is_some(),
            activity_set: commitment.activity_set,
            stake_set: commitment.stake_set,
            fitness_identity_linked: self.athletes.is_linked(),
            commitment_exists: commitment.exists,
        }
    }

    pub fn next_screen(&self) -> RouteDecision {
        next_screen(&self.signals())
    }

    pub fn on_next(&self, current: Screen) -> RouteDecision {
        on_next(current, &self.signals())
    }

    pub fn resolve(&self, requested: Screen) -> RouteDecision {
        resolve(requested, &self.signals())
    }

    /// Loads the activity catalog. On failure the catalog stays in its
    /// loading state.
    pub async fn load_catalog(&self) -> Result<()> {
        let activities = self.catalog.load_catalog().await?;
        self.store().set_catalog(activities);
        Ok(())
    }

    /// Reads the account's commitment and routes from the result.
    pub async fn refresh(&self) -> Result<RouteDecision> {
        let account = self.account()?;
        let commitment = self.commitments.refresh_commitment(&account).await?;
        self.publish(SessionUpdate::CommitmentChanged(commitment));
        Ok(self.next_screen())
    }

    /// Submits the draft from the Confirmation screen.
    ///
    /// A draft that fails validation is blocked without touching the chain.
    pub async fn confirm(&self) -> Result<RouteDecision> {
        let store = self.store();
        let catalog = store.catalog();
        let unmet = unmet_requirements(&store.snapshot(), catalog.activities(), store.now());
        if let Some(reason) = confirm_gate(&self.signals(), unmet) {
            debug!("Confirmation blocked: {}", reason);
            return Ok(RouteDecision::Blocked(reason));
        }

        let account = self.account()?;
        let user_id = self
            .athletes
            .athlete()
            .map(|a| a.id.to_string())
            .ok_or(ProviderError::NotLinked)?;

        match self.commitments.create_commitment(&account, &user_id).await {
            Ok(receipt) => {
                info!("Commitment confirmed in {}", receipt.hash);
                self.publish(SessionUpdate::CommitmentChanged(store.snapshot()));
                let decision = self.next_screen();
                if let Some(screen) = decision.screen() {
                    self.publish(SessionUpdate::Navigate(screen));
                }
                Ok(decision)
            }
            Err(e) => {
                self.publish(SessionUpdate::Notice(failure_notice(
                    &e,
                    TransactionType::DepositAndCommit,
                )));
                Err(e)
            }
        }
    }

    /// Current state of the Track flow.
    pub fn evaluate_track(&self) -> TrackOutcome {
        evaluate_track(&self.store().snapshot(), self.store().now())
    }

    /// Asks the oracle for a fresh distance, then re-evaluates Track.
    pub async fn request_progress_update(&self) -> Result<TrackOutcome> {
        let account = self.account()?;
        if let Err(e) = self.commitments.request_progress_update(&account).await {
            self.publish(SessionUpdate::Notice(failure_notice(
                &e,
                TransactionType::RequestActivityDistance,
            )));
            return Err(e);
        }
        Ok(self.after_refresh())
    }

    /// Settles the commitment from the Completion screen.
    pub async fn process_commitment(&self) -> Result<RouteDecision> {
        let account = self.account()?;
        if let Err(e) = self.commitments.process_commitment(&account).await {
            self.publish(SessionUpdate::Notice(failure_notice(
                &e,
                TransactionType::ProcessCommitmentUser,
            )));
            return Err(e);
        }
        self.publish(SessionUpdate::CommitmentChanged(self.store().snapshot()));
        Ok(self.next_screen())
    }

    /// Publishes the refreshed commitment and where Track goes from here.
    fn after_refresh(&self) -> TrackOutcome {
        self.publish(SessionUpdate::CommitmentChanged(self.store().snapshot()));
        let outcome = self.evaluate_track();
        match &outcome {
            TrackOutcome::Complete(result) => {
                info!("Commitment complete: {:?}", result);
                self.publish(SessionUpdate::Navigate(Screen::Completion));
            }
            TrackOutcome::Continue(notice) => {
                self.publish(SessionUpdate::Notice(notice.clone()));
            }
        }
        outcome
    }

    /// Starts listening to contract events. Calling it again while a
    /// listener is active does nothing.
    pub fn start(self: &Arc<Self>, source: &dyn ChainEventSourceTrait) {
        let mut subscription = self.subscription();
        if subscription.as_ref().is_some_and(|s| s.is_active()) {
            debug!("Contract event listener already running");
            return;
        }

        let mut events = source.subscribe();
        let session = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Contract event listener skipped {} events", skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                let Some(session) = session.upgrade() else {
                    break;
                };
                if let Err(e) = session.handle_contract_event(event).await {
                    warn!("Failed to handle contract event: {}", e);
                }
            }
            debug!("Contract event listener stopped");
        });

        *subscription = Some(EventSubscription::new(handle));
        info!("Listening for contract events");
    }

    pub fn is_listening(&self) -> bool {
        self.subscription().as_ref().is_some_and(|s| s.is_active())
    }

    /// Stops the contract-event listener.
    pub fn teardown(&self) {
        if self.subscription().take().is_some() {
            info!("Stopped listening for contract events");
        }
    }

    /// Reacts to a contract event addressed to the connected account.
    ///
    /// Returns `false` for events about other accounts.
    pub async fn handle_contract_event(&self, event: ContractEvent) -> Result<bool> {
        let Some(account) = self.wallet.connected_address() else {
            return Ok(false);
        };
        if !same_address(event.committer(), &account) {
            return Ok(false);
        }

        match event {
            ContractEvent::RequestActivityDistanceFulfilled { distance, .. } => {
                debug!("Oracle reported {} for {}", distance, account);
                self.commitments.refresh_commitment(&account).await?;
                self.after_refresh();
            }
            ContractEvent::CommitmentEnded { met, .. } => {
                info!("Commitment of {} ended, met={}", account, met);
                self.store().reset();
                self.commitments.refresh_commitment(&account).await?;
                self.publish(SessionUpdate::CommitmentChanged(self.store().snapshot()));
                self.publish(SessionUpdate::Notice(Notice::info(
                    "Your commitment has been processed. Ready for the next one?",
                )));
                self.publish(SessionUpdate::Navigate(Screen::ActivityGoal));
            }
        }
        Ok(true)
    }
}

/// Notice for a failed call, offering a retry of the method that failed.
fn failure_notice(error: &Error, fallback: TransactionType) -> Notice {
    match error {
        Error::Transaction(TransactionError::Failed { method, reason }) => {
            Notice::retryable(*method, format!("{} failed: {}", method, reason))
        }
        Error::Transaction(TransactionError::AlreadyPending(method)) => {
            Notice::info(format!("A {} transaction is already pending.", method))
        }
        other => Notice::retryable(fallback, other.to_string()),
    }
}
