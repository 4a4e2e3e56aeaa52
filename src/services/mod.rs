// Service exports
pub mod catalog;

pub use catalog::{CandidateSource, DataAccessError, InMemoryCatalog};
