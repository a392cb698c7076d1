//! Athletes module - linked fitness identity and provider seams.

mod athletes_model;
mod athletes_service;
mod athletes_traits;


pub use athletes_model::{Athlete, AthleteTokens, LinkedAthlete, TokenGrant};
pub use athletes_service::AthleteService;
pub use athletes_traits::{
    AthleteServiceTrait, FitnessProviderTrait, ProgressSourceTrait, UserRegistryTrait,
};
