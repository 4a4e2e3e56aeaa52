use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both coordinates are finite and inside their valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Kind of hospital, as recorded in the provider directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HospitalType {
    Public,
    Private,
    Clinic,
    Specialized,
}

impl HospitalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HospitalType::Public => "public",
            HospitalType::Private => "private",
            HospitalType::Clinic => "clinic",
            HospitalType::Specialized => "specialized",
        }
    }
}

impl fmt::Display for HospitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HospitalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(HospitalType::Public),
            "private" => Ok(HospitalType::Private),
            "clinic" => Ok(HospitalType::Clinic),
            "specialized" => Ok(HospitalType::Specialized),
            other => Err(format!(
                "unknown hospital type '{}', expected one of: public, private, clinic, specialized",
                other
            )),
        }
    }
}

/// Hospital record supplied by the data collaborator
///
/// Metric fields are optional because directory records may be incomplete;
/// feature extraction rejects a record with any of them missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: u64,
    pub name: String,
    pub hospital_type: HospitalType,
    #[serde(default)]
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub emergency_services: Option<bool>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u32>,
    #[serde(default)]
    pub doctor_count: Option<u32>,
}

impl Hospital {
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

/// Doctor record supplied by the data collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub hospital_ids: Vec<u64>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u32>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }

    pub fn practices_any(&self, specialties: &[String]) -> bool {
        self.specialties.iter().any(|s| specialties.contains(s))
    }

    pub fn is_affiliated_with(&self, hospital_id: u64) -> bool {
        self.hospital_ids.contains(&hospital_id)
    }
}

/// A candidate under evaluation, tagged by provider kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CandidateEntity {
    Hospital(Hospital),
    Doctor(Doctor),
}

impl CandidateEntity {
    pub fn id(&self) -> u64 {
        match self {
            CandidateEntity::Hospital(h) => h.id,
            CandidateEntity::Doctor(d) => d.id,
        }
    }
}

/// Ordered numeric features of one candidate
pub type FeatureVector = Vec<f64>;

/// Hospital filter criteria for a recommendation call
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalCriteria {
    pub location: Location,
    pub max_distance_km: f64,
    pub hospital_type: Option<HospitalType>,
    pub min_rating: f64,
}

impl HospitalCriteria {
    pub fn new(location: Location, max_distance_km: f64) -> Self {
        Self {
            location,
            max_distance_km,
            hospital_type: None,
            min_rating: 0.0,
        }
    }

    pub fn with_type(mut self, hospital_type: HospitalType) -> Self {
        self.hospital_type = Some(hospital_type);
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }
}

/// Doctor filter criteria for a recommendation call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoctorCriteria {
    pub specialties: Vec<String>,
    pub hospital_id: Option<u64>,
    pub min_rating: f64,
    pub max_fee: Option<f64>,
}

impl DoctorCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specialties<I, S>(mut self, specialties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialties = specialties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hospital(mut self, hospital_id: u64) -> Self {
        self.hospital_id = Some(hospital_id);
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_max_fee(mut self, max_fee: f64) -> Self {
        self.max_fee = Some(max_fee);
        self
    }
}

/// Predicates handed to the data collaborator when fetching hospitals
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HospitalQuery {
    pub hospital_type: Option<HospitalType>,
    pub min_rating: Option<f64>,
}

impl From<&HospitalCriteria> for HospitalQuery {
    fn from(criteria: &HospitalCriteria) -> Self {
        Self {
            hospital_type: criteria.hospital_type,
            min_rating: Some(criteria.min_rating),
        }
    }
}

/// Predicates handed to the data collaborator when fetching doctors
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoctorQuery {
    pub specialties: Vec<String>,
    pub hospital_id: Option<u64>,
    pub min_rating: Option<f64>,
    pub max_fee: Option<f64>,
}

impl From<&DoctorCriteria> for DoctorQuery {
    fn from(criteria: &DoctorCriteria) -> Self {
        Self {
            specialties: criteria.specialties.clone(),
            hospital_id: criteria.hospital_id,
            min_rating: Some(criteria.min_rating),
            max_fee: criteria.max_fee,
        }
    }
}

/// Ranked hospital with its blended score and distance from the requester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalRecommendation {
    pub hospital: Hospital,
    pub score: f64,
    pub distance_km: f64,
}

/// Ranked doctor with its centrality score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRecommendation {
    pub doctor: Doctor,
    pub score: f64,
}

/// Hospital paired with its distance, for proximity-only listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyHospital {
    pub hospital: Hospital,
    pub distance_km: f64,
}
