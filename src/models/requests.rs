use crate::core::RankingError;
use crate::models::domain::{DoctorCriteria, HospitalCriteria, HospitalType, Location};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Request to recommend hospitals around a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HospitalRecommendationRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default = "default_max_distance_km")]
    #[validate(range(exclusive_min = 0.0))]
    pub max_distance_km: f64,
    #[serde(default)]
    pub hospital_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub min_rating: f64,
}

fn default_max_distance_km() -> f64 {
    50.0
}

impl HospitalRecommendationRequest {
    /// Validate and convert into engine criteria
    pub fn into_criteria(self) -> Result<HospitalCriteria, RankingError> {
        self.validate().map_err(validation_error)?;

        let mut criteria = HospitalCriteria::new(
            Location::new(self.latitude, self.longitude),
            self.max_distance_km,
        )
        .with_min_rating(self.min_rating);

        // An empty type string means "any type"
        if let Some(raw) = self.hospital_type.as_deref().filter(|t| !t.trim().is_empty()) {
            let hospital_type: HospitalType =
                raw.parse().map_err(RankingError::InvalidFilterValue)?;
            criteria = criteria.with_type(hospital_type);
        }

        Ok(criteria)
    }
}

/// Request to recommend doctors
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DoctorRecommendationRequest {
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub hospital: Option<u64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub min_rating: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub max_fee: Option<f64>,
}

impl DoctorRecommendationRequest {
    pub fn into_criteria(self) -> Result<DoctorCriteria, RankingError> {
        self.validate().map_err(validation_error)?;

        let mut criteria = DoctorCriteria::new()
            .with_specialties(self.specialties.into_iter().filter(|s| !s.trim().is_empty()))
            .with_min_rating(self.min_rating);
        if let Some(hospital_id) = self.hospital {
            criteria = criteria.with_hospital(hospital_id);
        }
        if let Some(max_fee) = self.max_fee {
            criteria = criteria.with_max_fee(max_fee);
        }

        Ok(criteria)
    }
}

/// Request to list hospitals by proximity only
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    #[validate(range(exclusive_min = 0.0))]
    pub radius_km: f64,
    /// When set, return the k nearest hospitals instead of a radius search
    #[serde(default)]
    pub nearest: Option<usize>,
}

fn default_radius_km() -> f64 {
    10.0
}

impl NearbyRequest {
    pub fn location(&self) -> Result<Location, RankingError> {
        self.validate().map_err(validation_error)?;
        Ok(Location::new(self.latitude, self.longitude))
    }
}

/// Coordinate failures are location errors; everything else is a bad filter
fn validation_error(errors: ValidationErrors) -> RankingError {
    let fields = errors.field_errors();
    if fields.contains_key("latitude") || fields.contains_key("longitude") {
        RankingError::InvalidLocation(errors.to_string())
    } else {
        RankingError::InvalidFilterValue(errors.to_string())
    }
}
