use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, used for all great-circle conversions.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84-style (latitude, longitude) coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeodeticPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Embed the point on the unit sphere.
    ///
    /// Euclidean distance between embedded points (the chord) is a strictly
    /// monotonic function of great-circle distance, so nearest-neighbour
    /// ordering under the embedding matches ordering on the sphere. Raw
    /// (lat, lon) Euclidean distance does not have this property near the
    /// poles or across the antimeridian.
    #[must_use]
    pub fn to_unit_sphere(self) -> [f64; 3] {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    /// Great-circle distance to `other` in kilometers.
    #[must_use]
    pub fn great_circle_km(self, other: GeodeticPoint) -> f64 {
        chord_to_great_circle_km(chord_length(
            self.to_unit_sphere(),
            other.to_unit_sphere(),
        ))
    }
}

pub(crate) fn chord_length(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Convert a unit-sphere chord length to great-circle kilometers.
///
/// The clamp guards against rounding pushing `chord / 2` past 1.0, which
/// would put the value outside the domain of `asin`.
pub(crate) fn chord_to_great_circle_km(chord: f64) -> f64 {
    let angle = 2.0 * (chord / 2.0).clamp(0.0, 1.0).asin();
    EARTH_RADIUS_KM * angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_distance_is_zero() {
        let p = GeodeticPoint::new(11.0, 78.0);
        assert_eq!(p.great_circle_km(p), 0.0);
    }

    #[test]
    fn quarter_circumference_between_equator_points() {
        let a = GeodeticPoint::new(0.0, 0.0);
        let b = GeodeticPoint::new(0.0, 90.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((a.great_circle_km(b) - expected).abs() < 0.01);
    }

    #[test]
    fn antipodal_chord_clamps_instead_of_nan() {
        let a = GeodeticPoint::new(0.0, 0.0);
        let b = GeodeticPoint::new(0.0, 180.0);
        let d = a.great_circle_km(b);
        assert!(d.is_finite());
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 0.01);
    }

    #[test]
    fn embedding_lands_on_unit_sphere() {
        for p in [
            GeodeticPoint::new(0.0, 0.0),
            GeodeticPoint::new(89.9, -179.9),
            GeodeticPoint::new(-45.0, 13.0),
        ] {
            let [x, y, z] = p.to_unit_sphere();
            assert!((x * x + y * y + z * z - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn serializes_with_named_fields() {
        let json = serde_json::to_string(&GeodeticPoint::new(9.5, 77.25)).expect("serialize");
        assert!(json.contains("\"latitude\":9.5"));
        assert!(json.contains("\"longitude\":77.25"));
    }
}
