//! CommitPool Core - Commitment funnel logic, validation and normalization.
//!
//! This crate decides which screen a user sees, whether a commitment request
//! is well-formed, and how contract values map to application values. The
//! wallet, contract and fitness provider are reached through traits
//! implemented outside this crate.

pub mod activities;
pub mod athletes;
pub mod chain;
pub mod commitments;
pub mod constants;
pub mod environment;
pub mod errors;
pub mod routing;
pub mod session;
pub mod transactions;
pub mod utils;
pub mod wallet;

#[cfg(test)]
pub(crate) mod test_env;

pub use commitments::{CommitmentDraft, CommitmentStore};
pub use routing::{FunnelSignals, RouteDecision, Screen};
pub use session::CommitPoolSession;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
