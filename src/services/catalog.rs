use crate::models::{Doctor, DoctorQuery, Hospital, HospitalQuery};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or querying provider records
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Data-access collaborator that supplies candidate batches
///
/// Implementations return a fully materialised collection; the engine
/// never paginates or streams. A query nothing matches, including one that
/// names an unknown hospital, yields an empty batch rather than an error.
pub trait CandidateSource {
    fn fetch_hospitals(&self, query: &HospitalQuery) -> Result<Vec<Hospital>, DataAccessError>;

    fn fetch_doctors(&self, query: &DoctorQuery) -> Result<Vec<Doctor>, DataAccessError>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for &S {
    fn fetch_hospitals(&self, query: &HospitalQuery) -> Result<Vec<Hospital>, DataAccessError> {
        (**self).fetch_hospitals(query)
    }

    fn fetch_doctors(&self, query: &DoctorQuery) -> Result<Vec<Doctor>, DataAccessError> {
        (**self).fetch_doctors(query)
    }
}

/// Provider directory held in memory
///
/// Queries behave like a database filter: a record with no rating never
/// satisfies a rating floor, and one with no fee never satisfies a fee
/// ceiling.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    hospitals: Vec<Hospital>,
    doctors: Vec<Doctor>,
}

impl InMemoryCatalog {
    /// Create a catalog, filling in missing hospital doctor counts from
    /// the doctors' affiliations
    pub fn new(mut hospitals: Vec<Hospital>, doctors: Vec<Doctor>) -> Self {
        let mut affiliations: HashMap<u64, u32> = HashMap::new();
        for doctor in &doctors {
            for hospital_id in &doctor.hospital_ids {
                *affiliations.entry(*hospital_id).or_default() += 1;
            }
        }

        for hospital in hospitals.iter_mut() {
            if hospital.doctor_count.is_none() {
                hospital.doctor_count = Some(affiliations.get(&hospital.id).copied().unwrap_or(0));
            }
        }

        Self { hospitals, doctors }
    }

    /// Load hospitals and doctors from two JSON array files
    pub fn from_json_files<P: AsRef<Path>, Q: AsRef<Path>>(
        hospitals_path: P,
        doctors_path: Q,
    ) -> Result<Self, DataAccessError> {
        let hospitals: Vec<Hospital> = read_json(hospitals_path.as_ref())?;
        let doctors: Vec<Doctor> = read_json(doctors_path.as_ref())?;

        tracing::info!(
            "Loaded catalog: {} hospitals, {} doctors",
            hospitals.len(),
            doctors.len()
        );

        Ok(Self::new(hospitals, doctors))
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn hospital(&self, id: u64) -> Result<&Hospital, DataAccessError> {
        self.hospitals
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| DataAccessError::NotFound(format!("hospital {}", id)))
    }
}

impl CandidateSource for InMemoryCatalog {
    fn fetch_hospitals(&self, query: &HospitalQuery) -> Result<Vec<Hospital>, DataAccessError> {
        let hospitals: Vec<Hospital> = self
            .hospitals
            .iter()
            .filter(|h| meets_floor(h.average_rating, query.min_rating))
            .filter(|h| query.hospital_type.map_or(true, |t| h.hospital_type == t))
            .cloned()
            .collect();

        tracing::debug!("Catalog returned {} hospitals for {:?}", hospitals.len(), query);
        Ok(hospitals)
    }

    fn fetch_doctors(&self, query: &DoctorQuery) -> Result<Vec<Doctor>, DataAccessError> {
        if let Some(hospital_id) = query.hospital_id {
            if self.hospital(hospital_id).is_err() {
                tracing::debug!("Unknown hospital {}, no doctors can match", hospital_id);
                return Ok(Vec::new());
            }
        }

        let doctors: Vec<Doctor> = self
            .doctors
            .iter()
            .filter(|d| meets_floor(d.average_rating, query.min_rating))
            .filter(|d| query.specialties.is_empty() || d.practices_any(&query.specialties))
            .filter(|d| query.hospital_id.map_or(true, |id| d.is_affiliated_with(id)))
            .filter(|d| {
                query
                    .max_fee
                    .map_or(true, |max| d.consultation_fee.is_some_and(|fee| fee <= max))
            })
            .cloned()
            .collect();

        tracing::debug!("Catalog returned {} doctors for {:?}", doctors.len(), query);
        Ok(doctors)
    }
}

fn meets_floor(rating: Option<f64>, floor: Option<f64>) -> bool {
    match floor {
        Some(min) => rating.is_some_and(|r| r >= min),
        None => true,
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataAccessError> {
    if !path.exists() {
        return Err(DataAccessError::NotFound(path.display().to_string()));
    }

    let raw = fs::read_to_string(path)?;
    let records = serde_json::from_str(&raw)?;
    Ok(records)
}
