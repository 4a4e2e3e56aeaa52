// Integration tests for Care Rank

use care_rank::core::{rank_hospitals, RankingError, Recommender};
use care_rank::models::{
    Doctor, DoctorCriteria, DoctorQuery, Hospital, HospitalCriteria, HospitalQuery, HospitalType,
    Location,
};
use care_rank::services::{CandidateSource, DataAccessError, InMemoryCatalog};
use std::cell::Cell;
use std::io::Write;

/// Kilometers per degree of latitude on a 6371km sphere
const KM_PER_DEGREE: f64 = 111.194_926_644_558_7;

fn create_test_hospital(id: u64, rating: f64, lat: f64, lon: f64) -> Hospital {
    Hospital {
        id,
        name: format!("Hospital {}", id),
        hospital_type: HospitalType::Public,
        city: None,
        latitude: lat,
        longitude: lon,
        facilities: vec!["ICU".to_string(), "Pharmacy".to_string()],
        specialties: vec!["Cardiology".to_string()],
        emergency_services: Some(true),
        average_rating: Some(rating),
        success_rate: Some(90.0),
        total_reviews: Some(200),
        doctor_count: Some(12),
    }
}

fn create_test_doctor(id: u64, specialty: &str, rating: f64, fee: f64) -> Doctor {
    Doctor {
        id,
        first_name: "Test".to_string(),
        last_name: format!("Doctor{}", id),
        specialties: vec![specialty.to_string()],
        hospital_ids: vec![1],
        years_of_experience: Some(10 + id as u32),
        education: vec!["MD".to_string()],
        certifications: vec!["ACLS".to_string()],
        consultation_fee: Some(fee),
        average_rating: Some(rating),
        success_rate: Some(85.0 + id as f64),
        total_reviews: Some(50 * id as u32),
    }
}

fn origin() -> Location {
    Location::new(40.0, -74.0)
}

/// Source that counts fetches and can be told to fail
struct CountingSource {
    fetches: Cell<usize>,
    fail: bool,
}

impl CountingSource {
    fn new(fail: bool) -> Self {
        Self { fetches: Cell::new(0), fail }
    }
}

impl CandidateSource for CountingSource {
    fn fetch_hospitals(&self, _query: &HospitalQuery) -> Result<Vec<Hospital>, DataAccessError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.fail {
            return Err(DataAccessError::NotFound("hospital table".to_string()));
        }
        Ok(vec![])
    }

    fn fetch_doctors(&self, _query: &DoctorQuery) -> Result<Vec<Doctor>, DataAccessError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.fail {
            return Err(DataAccessError::NotFound("doctor table".to_string()));
        }
        Ok(vec![])
    }
}

#[test]
fn test_two_hospitals_same_distance_higher_rating_first() {
    let lat = origin().latitude + 1.5 / KM_PER_DEGREE;
    let a = create_test_hospital(1, 5.0, lat, -74.0);
    let b = create_test_hospital(2, 3.0, lat, -74.0);

    let result = rank_hospitals(&HospitalCriteria::new(origin(), 10.0), vec![a, b]).unwrap();

    assert_eq!(result.len(), 2);
    assert!((result[0].distance_km - 1.5).abs() < 0.01);
    assert_eq!(result[0].hospital.id, 1);
    assert!(result[0].score >= result[1].score);
}

#[test]
fn test_out_of_range_hospital_excluded_despite_centrality() {
    // Three near-identical hospitals far away would dominate centrality
    let far_lat = origin().latitude + 30.0 / KM_PER_DEGREE;
    let candidates = vec![
        create_test_hospital(1, 4.0, far_lat, -74.0),
        create_test_hospital(2, 4.0, far_lat, -74.0),
        create_test_hospital(3, 4.0, far_lat, -74.0),
        create_test_hospital(4, 2.0, 40.01, -74.0),
        create_test_hospital(5, 4.9, 40.02, -74.01),
    ];

    let result = rank_hospitals(&HospitalCriteria::new(origin(), 10.0), candidates).unwrap();

    let ids: Vec<u64> = result.iter().map(|r| r.hospital.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&4) && ids.contains(&5));
    assert!(result.iter().all(|r| r.distance_km <= 10.0));
}

#[test]
fn test_equal_scores_keep_input_order() {
    let candidates: Vec<Hospital> = (1..=4)
        .map(|id| create_test_hospital(id, 4.0, 40.01, -74.0))
        .collect();

    let result = rank_hospitals(&HospitalCriteria::new(origin(), 10.0), candidates).unwrap();

    let ids: Vec<u64> = result.iter().map(|r| r.hospital.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_hospital_scores_non_increasing() {
    let candidates: Vec<Hospital> = (0..25)
        .map(|i| {
            let mut h = create_test_hospital(i, 2.5 + (i % 5) as f64 * 0.5, 40.0 + i as f64 * 0.002, -74.0);
            h.total_reviews = Some(20 + (i as u32 * 37) % 300);
            h.emergency_services = Some(i % 3 == 0);
            h
        })
        .collect();

    let result = rank_hospitals(&HospitalCriteria::new(origin(), 25.0), candidates).unwrap();

    assert_eq!(result.len(), 25);
    for pair in result.windows(2) {
        assert!(pair[0].score >= pair[1].score, "Results not sorted by score");
    }
}

#[test]
fn test_extreme_metric_values_keep_scores_finite() {
    let candidates: Vec<Hospital> = [1.5e308, 1.7e308, 1.0]
        .into_iter()
        .enumerate()
        .map(|(i, success_rate)| {
            let mut h = create_test_hospital(i as u64 + 1, 4.0, 40.01, -74.0);
            h.success_rate = Some(success_rate);
            h
        })
        .collect();

    let result = rank_hospitals(&HospitalCriteria::new(origin(), 10.0), candidates).unwrap();

    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|r| r.score.is_finite()));
    for pair in result.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_empty_results_are_not_errors() {
    let catalog = InMemoryCatalog::new(
        vec![create_test_hospital(1, 4.0, 45.0, -74.0)],
        vec![
            create_test_doctor(1, "Cardiology", 4.5, 250.0),
            create_test_doctor(2, "Neurology", 4.5, 60.0),
        ],
    );
    let recommender = Recommender::new(&catalog);

    let hospitals = recommender
        .recommend_hospitals(&HospitalCriteria::new(origin(), 10.0))
        .unwrap();
    assert!(hospitals.is_empty());

    let typed = recommender
        .recommend_hospitals(&HospitalCriteria::new(origin(), 1000.0).with_type(HospitalType::Clinic))
        .unwrap();
    assert!(typed.is_empty());

    let doctors = recommender
        .recommend_doctors(&DoctorCriteria::new().with_specialties(["Cardiology"]).with_max_fee(100.0))
        .unwrap();
    assert!(doctors.is_empty());
}

#[test]
fn test_recommend_doctors_end_to_end() {
    let catalog = InMemoryCatalog::new(
        vec![create_test_hospital(1, 4.0, 40.01, -74.0)],
        vec![
            create_test_doctor(1, "Cardiology", 4.5, 90.0),
            create_test_doctor(2, "Cardiology", 4.2, 80.0),
            create_test_doctor(3, "Cardiology", 3.1, 95.0),
            create_test_doctor(4, "Cardiology", 4.8, 400.0),
            create_test_doctor(5, "Oncology", 4.9, 50.0),
        ],
    );
    let recommender = Recommender::new(&catalog);

    let criteria = DoctorCriteria::new()
        .with_specialties(["Cardiology"])
        .with_hospital(1)
        .with_min_rating(3.5)
        .with_max_fee(100.0);
    let result = recommender.recommend_doctors(&criteria).unwrap();

    let mut ids: Vec<u64> = result.iter().map(|r| r.doctor.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
    assert!(result[0].score >= result[1].score);
}

#[test]
fn test_invalid_input_rejected_before_fetch() {
    let source = CountingSource::new(false);
    let recommender = Recommender::new(&source);

    let bad_location = HospitalCriteria::new(Location::new(0.0, 181.0), 10.0);
    assert!(matches!(
        recommender.recommend_hospitals(&bad_location),
        Err(RankingError::InvalidLocation(_))
    ));

    let bad_rating = HospitalCriteria::new(origin(), 10.0).with_min_rating(-0.5);
    assert!(matches!(
        recommender.recommend_hospitals(&bad_rating),
        Err(RankingError::InvalidFilterValue(_))
    ));

    let bad_fee = DoctorCriteria::new().with_max_fee(-1.0);
    assert!(matches!(
        recommender.recommend_doctors(&bad_fee),
        Err(RankingError::InvalidFilterValue(_))
    ));

    assert_eq!(source.fetches.get(), 0);
}

#[test]
fn test_data_access_error_propagates() {
    let source = CountingSource::new(true);
    let recommender = Recommender::new(&source);

    let result = recommender.recommend_hospitals(&HospitalCriteria::new(origin(), 10.0));
    assert!(matches!(result, Err(RankingError::DataAccess(DataAccessError::NotFound(_)))));

    let result = recommender.recommend_doctors(&DoctorCriteria::new());
    assert!(matches!(result, Err(RankingError::DataAccess(_))));
    assert_eq!(source.fetches.get(), 2);
}

#[test]
fn test_concurrent_callers_get_identical_rankings() {
    let catalog = InMemoryCatalog::new(
        (0..20)
            .map(|i| create_test_hospital(i, 3.0 + (i % 4) as f64 * 0.5, 40.0 + i as f64 * 0.003, -74.0))
            .collect(),
        vec![],
    );
    let recommender = Recommender::new(&catalog);
    let criteria = HospitalCriteria::new(origin(), 15.0);
    let expected: Vec<u64> = recommender
        .recommend_hospitals(&criteria)
        .unwrap()
        .iter()
        .map(|r| r.hospital.id)
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| recommender.recommend_hospitals(&criteria).unwrap()))
            .collect();

        for handle in handles {
            let ids: Vec<u64> = handle.join().unwrap().iter().map(|r| r.hospital.id).collect();
            assert_eq!(ids, expected);
        }
    });
}

#[test]
fn test_catalog_from_json_files() {
    let mut hospitals = tempfile::NamedTempFile::new().unwrap();
    let mut doctors = tempfile::NamedTempFile::new().unwrap();

    write!(
        hospitals,
        r#"[
            {{"id": 1, "name": "North", "hospital_type": "public", "latitude": 40.01, "longitude": -74.0,
              "facilities": ["ICU"], "emergency_services": true, "average_rating": 4.2,
              "success_rate": 91.0, "total_reviews": 80}},
            {{"id": 2, "name": "South", "hospital_type": "clinic", "latitude": 39.99, "longitude": -74.0,
              "emergency_services": false, "average_rating": 3.8,
              "success_rate": 87.0, "total_reviews": 40}}
        ]"#
    )
    .unwrap();
    write!(
        doctors,
        r#"[
            {{"id": 1, "first_name": "Ana", "last_name": "Lima", "specialties": ["Cardiology"],
              "hospital_ids": [1, 2], "years_of_experience": 9, "consultation_fee": 75.0,
              "average_rating": 4.6, "success_rate": 94.0, "total_reviews": 66}}
        ]"#
    )
    .unwrap();

    let catalog = InMemoryCatalog::from_json_files(hospitals.path(), doctors.path()).unwrap();
    assert_eq!(catalog.hospitals()[0].doctor_count, Some(1));

    let recommender = Recommender::new(catalog);
    let ranked = recommender
        .recommend_hospitals(&HospitalCriteria::new(origin(), 5.0))
        .unwrap();
    assert_eq!(ranked.len(), 2);

    let nearest = recommender.nearest_hospitals(Location::new(40.02, -74.0), 1).unwrap();
    assert_eq!(nearest.len(), 1);
    assert_eq!(nearest[0].hospital.id, 1);
}

#[test]
fn test_malformed_catalog_file() {
    let mut hospitals = tempfile::NamedTempFile::new().unwrap();
    let doctors = tempfile::NamedTempFile::new().unwrap();
    write!(hospitals, "{{ not json").unwrap();

    let result = InMemoryCatalog::from_json_files(hospitals.path(), doctors.path());
    assert!(matches!(result, Err(DataAccessError::Parse(_))));
}
