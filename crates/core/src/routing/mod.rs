//! Routing module - screen selection, step gates and the Track flow.

mod routing_model;
mod routing_service;
mod track;


pub use routing_model::{BlockReason, FunnelSignals, Notice, NoticeKind, RouteDecision, Screen};
pub use routing_service::{confirm_gate, next_screen, on_next, preconditions_met, resolve};
pub use track::{evaluate_track, on_transaction_status, TrackOutcome, TransactionAction};
