use crate::core::RankingError;
use serde::{Deserialize, Serialize};

/// Envelope for any ranked or listed result set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse<T> {
    pub request_id: uuid::Uuid,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub total_results: usize,
    pub results: Vec<T>,
}

impl<T> RecommendationResponse<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4(),
            generated_at: chrono::Utc::now(),
            total_results: results.len(),
            results,
        }
    }

    /// Cap the number of returned results; `total_results` keeps the full count
    pub fn truncated(mut self, max_results: Option<usize>) -> Self {
        if let Some(max) = max_results {
            self.results.truncate(max);
        }
        self
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl From<&RankingError> for ErrorResponse {
    fn from(err: &RankingError) -> Self {
        Self {
            error: err.kind().to_string(),
            message: err.to_string(),
            status_code: err.status_code(),
        }
    }
}
