//! Great-circle distance between two coordinates using the haversine
//! formula.
//!
//! The formula treats Earth as a sphere, which is accurate to well
//! under a percent at delivery-radius scales.

use crate::types::geo::GeoCoordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the great-circle distance between two coordinates in
/// kilometers.
///
/// # Arguments
/// * `from` - One endpoint.
/// * `to` - The other endpoint.
///
/// # Returns
/// The distance in kilometers. Identical endpoints yield 0.
pub fn distance(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    let from_lat = from.latitude.into_inner().to_radians();
    let from_lon = from.longitude.into_inner().to_radians();
    let to_lat = to.latitude.into_inner().to_radians();
    let to_lon = to.longitude.into_inner().to_radians();

    let delta_lat = to_lat - from_lat;
    let delta_lon = to_lon - from_lon;

    let a = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod haversine_tests {
    use super::*;

    #[test]
    fn test_identical_coordinates_yield_zero() {
        let point = GeoCoordinate::new(22.5726, 88.3639);
        assert_eq!(distance(&point, &point), 0.0);
    }

    /// Distance is symmetric in its endpoints.
    #[test]
    fn test_symmetry() {
        let a = GeoCoordinate::new(28.6139, 77.2090);
        let b = GeoCoordinate::new(19.0760, 72.8777);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn test_distance_is_finite_and_non_negative() {
        let pairs = [
            (GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.0, 0.0)),
            (GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(1.0, 1.0)),
            (GeoCoordinate::new(-90.0, 0.0), GeoCoordinate::new(90.0, 0.0)),
            (GeoCoordinate::new(45.0, -180.0), GeoCoordinate::new(45.0, 180.0)),
        ];
        for (a, b) in pairs {
            let d = distance(&a, &b);
            assert!(d.is_finite());
            assert!(d >= 0.0);
        }
    }

    /// Delhi to Mumbai is roughly 1150 km as the crow flies.
    #[test]
    fn test_known_long_distance() {
        let delhi = GeoCoordinate::new(28.6139, 77.2090);
        let mumbai = GeoCoordinate::new(19.0760, 72.8777);
        let d = distance(&delhi, &mumbai);
        assert!((1100.0..1200.0).contains(&d), "got {}", d);
    }

    /// Antipodal points sit half the Earth's circumference apart.
    #[test]
    fn test_antipodal_distance() {
        let a = GeoCoordinate::new(0.0, 0.0);
        let b = GeoCoordinate::new(0.0, 180.0);
        let d = distance(&a, &b);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half_circumference).abs() < 1.0, "got {}", d);
    }
}
