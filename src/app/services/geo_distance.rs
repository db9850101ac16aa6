//! Great-circle distance between two points on the Earth

use super::validation::validate_coordinate;
use crate::Result;
use crate::constants::EARTH_RADIUS_KM;

/// Return the distance in km between two points on the Earth
///
/// Latitude and longitude for each point are given in decimal degrees.
/// Both points are validated first, so out-of-range or non-finite input
/// fails with [`crate::Error::InvalidCoordinate`].
///
/// # Examples
/// ```
/// use glacier_analysis::distance;
///
/// // Aletsch to Rhone glacier, roughly 31 km apart
/// let km = distance(46.50, 8.03, 46.62, 8.40).unwrap();
/// assert!(km > 25.0 && km < 35.0);
/// ```
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    validate_coordinate(lat1, lon1)?;
    validate_coordinate(lat2, lon2)?;

    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let half_dlat = ((lat2 - lat1) / 2.0).sin();
    let half_dlon = ((lon2 - lon1) / 2.0).sin();

    let a = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon;

    // Rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);

    Ok(2.0 * EARTH_RADIUS_KM * a.sqrt().asin())
}
