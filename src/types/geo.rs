//! Struct definitions and implementations for [`GeoCoordinate`] and
//! [`Hub`].
//!
//! Coordinates always travel as `Option<GeoCoordinate>`: absence (not
//! zero) signals an unknown location. `(0, 0)` is a real point in the
//! Gulf of Guinea and must be computed normally.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A [`GeoCoordinate`] represents the geographic position of an object
/// in degrees. Typically, this type is used for a [`Hub`] site or a
/// customer delivery location.
///
/// Float values are wrapped in [`OrderedFloat`] so coordinates can be
/// compared and hashed, which plain floats do not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: OrderedFloat<f64>,
    pub longitude: OrderedFloat<f64>,
}

impl GeoCoordinate {
    /// Creates a coordinate from raw degree values.
    pub fn new(latitude: f64, longitude: f64) -> GeoCoordinate {
        GeoCoordinate {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }

    /// Whether the coordinate lies on the globe: latitude within
    /// [-90, 90] and longitude within [-180, 180]. NaN values fall
    /// outside both ranges and are rejected.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude.into_inner())
            && (-180.0..=180.0).contains(&self.longitude.into_inner())
    }
}

/// A fixed dispatch point bound to an order at confirmation time.
///
/// A hub is immutable for the lifetime of this library's concern;
/// reassigning an order to a different hub is an external flow that
/// re-runs the assignment evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    /// Typed as a [`String`] to allow for synthetic ids assigned by the
    /// external order store.
    pub id: String,

    /// Display name, used in holding reasons shown to operators.
    pub name: String,

    /// A hub record may exist before its site has been geocoded, in
    /// which case it cannot serve deliveries yet.
    pub location: Option<GeoCoordinate>,
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod geo_tests {
    use super::*;

    #[test]
    fn test_valid_coordinate_bounds() {
        assert!(GeoCoordinate::new(22.5726, 88.3639).is_valid());
        assert!(GeoCoordinate::new(-90.0, 180.0).is_valid());
        assert!(GeoCoordinate::new(90.0, -180.0).is_valid());
    }

    /// The null island coordinate is a real point, not a missing one.
    #[test]
    fn test_zero_zero_is_valid() {
        assert!(GeoCoordinate::new(0.0, 0.0).is_valid());
    }

    #[test]
    fn test_out_of_range_coordinates_are_invalid() {
        assert!(!GeoCoordinate::new(91.0, 0.0).is_valid());
        assert!(!GeoCoordinate::new(-90.1, 0.0).is_valid());
        assert!(!GeoCoordinate::new(0.0, 180.5).is_valid());
        assert!(!GeoCoordinate::new(0.0, -181.0).is_valid());
        assert!(!GeoCoordinate::new(f64::NAN, 0.0).is_valid());
    }
}
