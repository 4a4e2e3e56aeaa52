use crate::core::error::RankingError;
use crate::core::features::Candidate;
use crate::models::{Doctor, DoctorCriteria, Hospital, HospitalCriteria};

/// Check that hospital criteria are usable before anything is fetched
pub fn validate_hospital_criteria(criteria: &HospitalCriteria) -> Result<(), RankingError> {
    super::distance::validate_location(&criteria.location)?;
    validate_radius("max_distance_km", criteria.max_distance_km)?;
    validate_non_negative("min_rating", criteria.min_rating)
}

/// Check that doctor criteria are usable before anything is fetched
pub fn validate_doctor_criteria(criteria: &DoctorCriteria) -> Result<(), RankingError> {
    validate_non_negative("min_rating", criteria.min_rating)?;
    if let Some(max_fee) = criteria.max_fee {
        validate_non_negative("max_fee", max_fee)?;
    }
    Ok(())
}

/// Search radii must be finite and strictly positive
pub fn validate_radius(name: &str, value: f64) -> Result<(), RankingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RankingError::InvalidFilterValue(format!(
            "{} must be greater than 0, got {}",
            name, value
        )))
    }
}

fn validate_non_negative(name: &str, value: f64) -> Result<(), RankingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RankingError::InvalidFilterValue(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

/// Stage 1 for hospitals: type, then rating floor
///
/// Distance is checked separately once the distance is known. A hospital
/// with no rating never satisfies the floor, the same as a database filter
/// on a NULL column.
pub fn matches_hospital_criteria(
    hospital: &Hospital,
    criteria: &HospitalCriteria,
) -> Result<bool, RankingError> {
    if let Some(wanted) = criteria.hospital_type {
        if hospital.hospital_type != wanted {
            return Ok(false);
        }
    }

    meets_rating_floor(hospital, hospital.average_rating, criteria.min_rating)
}

/// Stage 1 for doctors: specialty overlap, affiliation, fee ceiling, rating floor
///
/// Missing ratings and fees fail their threshold rather than the call.
pub fn matches_doctor_criteria(
    doctor: &Doctor,
    criteria: &DoctorCriteria,
) -> Result<bool, RankingError> {
    // An empty specialty list means "any specialty"
    if !criteria.specialties.is_empty() && !doctor.practices_any(&criteria.specialties) {
        return Ok(false);
    }

    if let Some(hospital_id) = criteria.hospital_id {
        if !doctor.is_affiliated_with(hospital_id) {
            return Ok(false);
        }
    }

    if let Some(max_fee) = criteria.max_fee {
        match doctor.consultation_fee {
            Some(fee) if fee <= max_fee => {}
            _ => return Ok(false),
        }
    }

    meets_rating_floor(doctor, doctor.average_rating, criteria.min_rating)
}

fn meets_rating_floor<C: Candidate>(
    candidate: &C,
    rating: Option<f64>,
    min_rating: f64,
) -> Result<bool, RankingError> {
    match rating {
        Some(r) if r.is_finite() => Ok(r >= min_rating),
        Some(r) => Err(RankingError::InvalidEntityData(format!(
            "{} has non-numeric 'average_rating': {}",
            candidate.label(),
            r
        ))),
        None => Ok(false),
    }
}
