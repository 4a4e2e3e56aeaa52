use crate::services::DataAccessError;
use thiserror::Error;

/// Errors raised by the recommendation engine
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Invalid filter value: {0}")]
    InvalidFilterValue(String),

    #[error("Invalid entity data: {0}")]
    InvalidEntityData(String),

    #[error("Data access error: {0}")]
    DataAccess(#[from] DataAccessError),
}

impl RankingError {
    /// Short machine-readable kind, used in error envelopes
    pub fn kind(&self) -> &'static str {
        match self {
            RankingError::InvalidLocation(_) => "invalid_location",
            RankingError::InvalidFilterValue(_) => "invalid_filter_value",
            RankingError::InvalidEntityData(_) => "invalid_entity_data",
            RankingError::DataAccess(_) => "data_access_error",
        }
    }

    /// HTTP-style status a calling shell would map this error to
    pub fn status_code(&self) -> u16 {
        match self {
            RankingError::InvalidLocation(_) | RankingError::InvalidFilterValue(_) => 400,
            RankingError::InvalidEntityData(_) => 422,
            RankingError::DataAccess(_) => 500,
        }
    }
}
