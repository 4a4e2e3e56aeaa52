//! Care Rank - healthcare provider recommendation engine
//!
//! Ranks hospitals and doctors for a requester by combining geographic
//! proximity with a batch-relative similarity score. Every call is a pure
//! computation over the candidate batch it is given.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{distance::haversine_distance, RankingError, Recommender};
pub use models::{
    Doctor, DoctorCriteria, DoctorRecommendation, Hospital, HospitalCriteria,
    HospitalRecommendation, HospitalType, Location,
};
pub use services::{CandidateSource, InMemoryCatalog};
