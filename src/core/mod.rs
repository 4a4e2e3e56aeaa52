// Core algorithm exports
pub mod distance;
pub mod error;
pub mod features;
pub mod filters;
pub mod normalize;
pub mod recommender;
pub mod scoring;
pub mod similarity;

pub use distance::{distance, haversine_distance, validate_location};
pub use error::RankingError;
pub use features::{extract, extract_batch, Candidate};
pub use filters::{matches_doctor_criteria, matches_hospital_criteria};
pub use normalize::standardize;
pub use recommender::{rank_doctors, rank_hospitals, Recommender};
pub use scoring::{distance_penalty, score_batch};
pub use similarity::{centrality_scores, cosine_similarity, similarity_matrix, SimilarityMatrix};
