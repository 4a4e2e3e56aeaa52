use crate::core::{
    distance::{distance, validate_location},
    error::RankingError,
    features::Candidate,
    filters::{
        matches_doctor_criteria, matches_hospital_criteria, validate_doctor_criteria,
        validate_hospital_criteria, validate_radius,
    },
    scoring::{hospital_score, score_batch},
};
use crate::models::{
    Doctor, DoctorCriteria, DoctorQuery, DoctorRecommendation, Hospital, HospitalCriteria,
    HospitalQuery, HospitalRecommendation, Location, NearbyHospital,
};
use crate::services::CandidateSource;
use std::cmp::Ordering;

/// Recommendation entry points over a candidate source
///
/// Holds nothing but the source: every call validates its inputs, fetches a
/// fresh batch and scores it from scratch, so a `Recommender` can be shared
/// freely between threads.
///
/// # Pipeline Stages
/// 1. Input validation (before any fetch)
/// 2. Candidate fetch from the source
/// 3. Attribute filtering (rating floor, type / specialty / affiliation / fee)
/// 4. Distance filtering (hospitals only)
/// 5. Feature extraction, standardisation, cosine centrality
/// 6. Distance penalty (hospitals only) and stable descending sort
#[derive(Debug, Clone)]
pub struct Recommender<S> {
    source: S,
}

impl<S: CandidateSource> Recommender<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Rank hospitals near `criteria.location`
    pub fn recommend_hospitals(
        &self,
        criteria: &HospitalCriteria,
    ) -> Result<Vec<HospitalRecommendation>, RankingError> {
        validate_hospital_criteria(criteria)?;

        let candidates = self.source.fetch_hospitals(&HospitalQuery::from(criteria))?;
        rank_hospitals(criteria, candidates)
    }

    /// Rank doctors matching the criteria
    pub fn recommend_doctors(
        &self,
        criteria: &DoctorCriteria,
    ) -> Result<Vec<DoctorRecommendation>, RankingError> {
        validate_doctor_criteria(criteria)?;

        let candidates = self.source.fetch_doctors(&DoctorQuery::from(criteria))?;
        rank_doctors(criteria, candidates)
    }

    /// Every hospital within `radius_km`, closest first
    pub fn nearby_hospitals(
        &self,
        location: Location,
        radius_km: f64,
    ) -> Result<Vec<NearbyHospital>, RankingError> {
        validate_location(&location)?;
        validate_radius("radius_km", radius_km)?;

        let candidates = self.source.fetch_hospitals(&HospitalQuery::default())?;
        let mut nearby = sort_by_distance(&location, candidates)?;
        nearby.retain(|n| n.distance_km <= radius_km);

        tracing::debug!("{} hospitals within {}km of {}", nearby.len(), radius_km, location);
        Ok(nearby)
    }

    /// The `k` closest hospitals regardless of radius
    pub fn nearest_hospitals(
        &self,
        location: Location,
        k: usize,
    ) -> Result<Vec<NearbyHospital>, RankingError> {
        validate_location(&location)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let candidates = self.source.fetch_hospitals(&HospitalQuery::default())?;
        let mut nearest = sort_by_distance(&location, candidates)?;
        nearest.truncate(k);
        Ok(nearest)
    }
}

/// Rank an already-fetched hospital batch
///
/// Filters are re-applied here, so the result is correct whatever the
/// source did with the query.
pub fn rank_hospitals(
    criteria: &HospitalCriteria,
    candidates: Vec<Hospital>,
) -> Result<Vec<HospitalRecommendation>, RankingError> {
    validate_hospital_criteria(criteria)?;
    let total_candidates = candidates.len();

    let mut in_range = Vec::with_capacity(candidates.len());
    for hospital in candidates {
        if !matches_hospital_criteria(&hospital, criteria)? {
            continue;
        }
        let distance_km = hospital_distance(&criteria.location, &hospital)?;
        if distance_km <= criteria.max_distance_km {
            in_range.push((hospital, distance_km));
        }
    }

    tracing::debug!(
        "{} of {} hospitals passed filters within {}km",
        in_range.len(),
        total_candidates,
        criteria.max_distance_km
    );

    if in_range.is_empty() {
        return Ok(Vec::new());
    }

    let (hospitals, distances): (Vec<Hospital>, Vec<f64>) = in_range.into_iter().unzip();
    let centrality = score_batch(&hospitals)?;

    let mut ranked: Vec<HospitalRecommendation> = hospitals
        .into_iter()
        .zip(distances)
        .zip(centrality)
        .map(|((hospital, distance_km), score)| HospitalRecommendation {
            score: hospital_score(score, distance_km, criteria.max_distance_km),
            hospital,
            distance_km,
        })
        .collect();

    // sort_by is stable: equal scores keep their input order
    ranked.sort_by(|a, b| descending(a.score, b.score));

    tracing::info!("Ranked {} hospitals", ranked.len());
    Ok(ranked)
}

/// Rank an already-fetched doctor batch
pub fn rank_doctors(
    criteria: &DoctorCriteria,
    candidates: Vec<Doctor>,
) -> Result<Vec<DoctorRecommendation>, RankingError> {
    validate_doctor_criteria(criteria)?;
    let total_candidates = candidates.len();

    let mut doctors = Vec::with_capacity(candidates.len());
    for doctor in candidates {
        if matches_doctor_criteria(&doctor, criteria)? {
            doctors.push(doctor);
        }
    }

    tracing::debug!("{} of {} doctors passed filters", doctors.len(), total_candidates);

    if doctors.is_empty() {
        return Ok(Vec::new());
    }

    let centrality = score_batch(&doctors)?;

    let mut ranked: Vec<DoctorRecommendation> = doctors
        .into_iter()
        .zip(centrality)
        .map(|(doctor, score)| DoctorRecommendation { doctor, score })
        .collect();

    ranked.sort_by(|a, b| descending(a.score, b.score));

    tracing::info!("Ranked {} doctors", ranked.len());
    Ok(ranked)
}

/// Pair each hospital with its distance and order closest first (stable)
pub fn sort_by_distance(
    location: &Location,
    candidates: Vec<Hospital>,
) -> Result<Vec<NearbyHospital>, RankingError> {
    let mut nearby = candidates
        .into_iter()
        .map(|hospital| {
            let distance_km = hospital_distance(location, &hospital)?;
            Ok(NearbyHospital { hospital, distance_km })
        })
        .collect::<Result<Vec<_>, RankingError>>()?;

    nearby.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    Ok(nearby)
}

/// Distance to a hospital; a hospital with bad coordinates is a bad record
fn hospital_distance(from: &Location, hospital: &Hospital) -> Result<f64, RankingError> {
    distance(from, &hospital.location()).map_err(|_| {
        RankingError::InvalidEntityData(format!(
            "{} has invalid coordinates {}",
            hospital.label(),
            hospital.location()
        ))
    })
}

#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
