//! Feature extraction for candidate providers.
//!
//! Column order is fixed per provider kind and defines what each
//! cosine-similarity dimension means:
//!
//! | kind     | columns |
//! |----------|---------|
//! | hospital | average_rating, success_rate, total_reviews, emergency_services, facility_count, doctor_count |
//! | doctor   | average_rating, success_rate, total_reviews, years_of_experience, education_count, certification_count, specialty_count, consultation_fee |

use crate::core::error::RankingError;
use crate::models::{CandidateEntity, Doctor, FeatureVector, Hospital};

pub const HOSPITAL_FEATURE_COUNT: usize = 6;
pub const DOCTOR_FEATURE_COUNT: usize = 8;

/// Anything the engine can turn into a feature vector
pub trait Candidate {
    /// Human-readable label used in error messages
    fn label(&self) -> String;

    fn features(&self) -> Result<FeatureVector, RankingError>;
}

impl Candidate for Hospital {
    fn label(&self) -> String {
        format!("hospital {} ({})", self.id, self.name)
    }

    fn features(&self) -> Result<FeatureVector, RankingError> {
        let emergency = require(self, "emergency_services", self.emergency_services)?;

        Ok(vec![
            require_finite(self, "average_rating", self.average_rating)?,
            require_finite(self, "success_rate", self.success_rate)?,
            require(self, "total_reviews", self.total_reviews)? as f64,
            if emergency { 1.0 } else { 0.0 },
            self.facilities.len() as f64,
            require(self, "doctor_count", self.doctor_count)? as f64,
        ])
    }
}

impl Candidate for Doctor {
    fn label(&self) -> String {
        format!("doctor {} ({})", self.id, self.full_name())
    }

    fn features(&self) -> Result<FeatureVector, RankingError> {
        Ok(vec![
            require_finite(self, "average_rating", self.average_rating)?,
            require_finite(self, "success_rate", self.success_rate)?,
            require(self, "total_reviews", self.total_reviews)? as f64,
            require(self, "years_of_experience", self.years_of_experience)? as f64,
            self.education.len() as f64,
            self.certifications.len() as f64,
            self.specialties.len() as f64,
            require_finite(self, "consultation_fee", self.consultation_fee)?,
        ])
    }
}

impl Candidate for CandidateEntity {
    fn label(&self) -> String {
        match self {
            CandidateEntity::Hospital(h) => h.label(),
            CandidateEntity::Doctor(d) => d.label(),
        }
    }

    fn features(&self) -> Result<FeatureVector, RankingError> {
        match self {
            CandidateEntity::Hospital(h) => h.features(),
            CandidateEntity::Doctor(d) => d.features(),
        }
    }
}

/// Extract the feature vector of a tagged candidate
pub fn extract(entity: &CandidateEntity) -> Result<FeatureVector, RankingError> {
    entity.features()
}

/// Extract features for a whole batch, failing on the first malformed record
pub fn extract_batch<C: Candidate>(candidates: &[C]) -> Result<Vec<FeatureVector>, RankingError> {
    candidates.iter().map(Candidate::features).collect()
}

fn require<C: Candidate + ?Sized, T>(
    candidate: &C,
    field: &str,
    value: Option<T>,
) -> Result<T, RankingError> {
    value.ok_or_else(|| {
        RankingError::InvalidEntityData(format!("{} is missing '{}'", candidate.label(), field))
    })
}

fn require_finite<C: Candidate + ?Sized>(
    candidate: &C,
    field: &str,
    value: Option<f64>,
) -> Result<f64, RankingError> {
    let value = require(candidate, field, value)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RankingError::InvalidEntityData(format!(
            "{} has non-numeric '{}': {}",
            candidate.label(),
            field,
            value
        )))
    }
}
