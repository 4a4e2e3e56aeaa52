use crate::core::error::RankingError;
use crate::core::features::{extract_batch, Candidate};
use crate::core::normalize::standardize;
use crate::core::similarity::{centrality_scores, similarity_matrix};

/// Linear distance penalty in [0.5, 1.0]
///
/// penalty = 1 - distance / (2 * max_distance)
///
/// 1.0 at the requester's location, 0.5 at the edge of the search radius.
#[inline]
pub fn distance_penalty(distance_km: f64, max_distance_km: f64) -> f64 {
    1.0 - distance_km / (2.0 * max_distance_km)
}

/// Centrality score of every candidate in the batch, in input order
///
/// Extract → standardise → cosine matrix → row means. Everything computed
/// here lives only for the duration of the call.
pub fn score_batch<C: Candidate>(candidates: &[C]) -> Result<Vec<f64>, RankingError> {
    let features = extract_batch(candidates)?;
    let normalized = standardize(&features)?;
    let matrix = similarity_matrix(&normalized);
    Ok(centrality_scores(&matrix))
}

/// Blend a centrality score with the distance penalty
#[inline]
pub fn hospital_score(centrality: f64, distance_km: f64, max_distance_km: f64) -> f64 {
    centrality * distance_penalty(distance_km, max_distance_km)
}
