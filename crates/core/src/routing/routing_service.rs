//! The funnel's routing table.
//!
//! Every screen's "Next" handler goes through [`next_screen`] or one of the
//! step gates built on it, so the priority order lives in one place.

use log::debug;

use super::routing_model::{BlockReason, FunnelSignals, RouteDecision, Screen};
use crate::commitments::Requirement;

/// Picks the screen the user should land on next.
///
/// Rules are evaluated in priority order and the first match wins:
/// an existing commitment always goes to Track, a fully prepared draft to
/// Confirmation, a draft without a linked fitness account to
/// ActivitySource, any connected wallet to ActivityGoal. Without a wallet
/// the transition is blocked.
pub fn next_screen(signals: &FunnelSignals) -> RouteDecision {
    let FunnelSignals {
        wallet_connected,
        activity_set,
        stake_set,
        fitness_identity_linked,
        commitment_exists,
    } = *signals;

    if commitment_exists {
        return RouteDecision::Navigate(Screen::Track);
    }
    if wallet_connected && activity_set && stake_set && fitness_identity_linked {
        return RouteDecision::Navigate(Screen::Confirmation);
    }
    if wallet_connected && activity_set && stake_set {
        return RouteDecision::Navigate(Screen::ActivitySource);
    }
    if wallet_connected {
        return RouteDecision::Navigate(Screen::ActivityGoal);
    }
    RouteDecision::Blocked(BlockReason::ConnectWallet)
}

/// "Next" from `current`.
///
/// The funnel steps add their own gate before falling back to the table:
/// ActivityGoal needs the activity parameters, Staking needs the stake too,
/// ActivitySource needs a linked fitness account.
pub fn on_next(current: Screen, signals: &FunnelSignals) -> RouteDecision {
    if signals.commitment_exists || !signals.wallet_connected {
        return next_screen(signals);
    }

    let decision = match current {
        Screen::ActivityGoal if !signals.activity_set => {
            RouteDecision::Blocked(BlockReason::ActivityNotSet)
        }
        Screen::ActivityGoal => RouteDecision::Navigate(Screen::Staking),
        Screen::Staking if !signals.activity_set => {
            RouteDecision::Blocked(BlockReason::ActivityNotSet)
        }
        Screen::Staking if !signals.stake_set => RouteDecision::Blocked(BlockReason::StakeNotSet),
        Screen::Staking => RouteDecision::Navigate(Screen::ActivitySource),
        Screen::ActivitySource if !signals.fitness_identity_linked => {
            RouteDecision::Blocked(BlockReason::FitnessNotLinked)
        }
        _ => next_screen(signals),
    };

    debug!("Next from {:?}: {:?}", current, decision);
    decision
}

/// Gate of the Confirmation screen's submit button.
///
/// Returns `None` when the request may be sent.
pub fn confirm_gate(signals: &FunnelSignals, unmet: Vec<Requirement>) -> Option<BlockReason> {
    if !signals.wallet_connected {
        return Some(BlockReason::ConnectWallet);
    }
    if !signals.fitness_identity_linked {
        return Some(BlockReason::FitnessNotLinked);
    }
    if !unmet.is_empty() {
        return Some(BlockReason::InvalidCommitment(unmet));
    }
    None
}

/// Whether `screen` may be shown for the given signals.
pub fn preconditions_met(screen: Screen, signals: &FunnelSignals) -> bool {
    let s = signals;
    match screen {
        Screen::Landing | Screen::Login | Screen::Faq => true,
        Screen::Track | Screen::Completion => s.commitment_exists,
        Screen::ActivityGoal => s.wallet_connected && !s.commitment_exists,
        Screen::Staking => s.wallet_connected && s.activity_set && !s.commitment_exists,
        Screen::ActivitySource => {
            s.wallet_connected && s.activity_set && s.stake_set && !s.commitment_exists
        }
        Screen::Confirmation => {
            s.wallet_connected
                && s.activity_set
                && s.stake_set
                && s.fitness_identity_linked
                && !s.commitment_exists
        }
    }
}

/// Direct navigation to `requested`, redirected through the table when
/// its preconditions are not met.
pub fn resolve(requested: Screen, signals: &FunnelSignals) -> RouteDecision {
    if preconditions_met(requested, signals) {
        RouteDecision::Navigate(requested)
    } else {
        next_screen(signals)
    }
}
