//! Geographic point value object

use serde::{Deserialize, Serialize};

/// Mean earth radius in meters, used for haversine distance
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 longitude/latitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Create a new point without validation
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Check that the coordinates are within valid WGS84 bounds
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
            && self.longitude.is_finite()
            && self.latitude.is_finite()
    }

    /// Great-circle distance to another point in meters (haversine)
    #[must_use]
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
        assert!(GeoPoint::new(-180.0, 90.0).is_valid());
        assert!(!GeoPoint::new(180.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -90.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_distance_zero() {
        let p = GeoPoint::new(126.978, 37.566);
        assert!(p.distance_m(&p) < 1e-6);
    }

    #[test]
    fn test_distance_known_pair() {
        // Paris to London, roughly 344 km
        let paris = GeoPoint::new(2.3522, 48.8566);
        let london = GeoPoint::new(-0.1276, 51.5072);
        let d = paris.distance_m(&london);
        assert!((330_000.0..360_000.0).contains(&d), "got {d}");
    }
}
