use crate::core::error::RankingError;
use crate::models::Location;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// Inputs are not range-checked; use [`distance`] for validated locations.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance in kilometers between two validated locations
pub fn distance(a: &Location, b: &Location) -> Result<f64, RankingError> {
    validate_location(a)?;
    validate_location(b)?;
    Ok(haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude))
}

/// Reject coordinates that are non-finite or outside the valid ranges
pub fn validate_location(location: &Location) -> Result<(), RankingError> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(RankingError::InvalidLocation(format!(
            "{} is outside latitude [-90, 90] / longitude [-180, 180]",
            location
        )))
    }
}
