// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateEntity, Doctor, DoctorCriteria, DoctorQuery, DoctorRecommendation, FeatureVector,
    Hospital, HospitalCriteria, HospitalQuery, HospitalRecommendation, HospitalType, Location,
    NearbyHospital,
};
pub use requests::{DoctorRecommendationRequest, HospitalRecommendationRequest, NearbyRequest};
pub use responses::{ErrorResponse, RecommendationResponse};
