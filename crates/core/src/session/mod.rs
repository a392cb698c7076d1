//! Session module - funnel state and the contract-event subscription.

mod session_model;
mod session_service;


pub use session_model::{EventSubscription, SessionUpdate};
pub use session_service::CommitPoolSession;
