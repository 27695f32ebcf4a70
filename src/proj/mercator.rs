//! Mercator latitude transform (spherical).
//!
//! forward: y = degrees(ln(tan(φ/2 + π/4))), clamped to ±84°
//! inverse: φ = degrees(2·(atan(e^y_rad) - π/4))

use std::f64::consts::FRAC_PI_4;

/// Latitude limit beyond which the transform clamps instead of extrapolating.
pub const MERCATOR_LAT_LIMIT: f64 = 84.0;

/// Latitude in degrees → Mercator vertical coordinate in degrees.
///
/// Latitudes beyond ±[`MERCATOR_LAT_LIMIT`] re-enter with the sign-preserving
/// clamped value, so the poles map to a finite band edge.
pub fn to_mercator_lat(lat: f64) -> f64 {
    if lat.abs() > MERCATOR_LAT_LIMIT {
        return to_mercator_lat(MERCATOR_LAT_LIMIT.copysign(lat));
    }
    (lat.to_radians() / 2.0 + FRAC_PI_4).tan().ln().to_degrees()
}

/// Exact inverse of [`to_mercator_lat`] for latitudes within the limit.
pub fn from_mercator_lat(y: f64) -> f64 {
    (2.0 * (y.to_radians().exp().atan() - FRAC_PI_4)).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roundtrip_within_limit() {
        let mut lat = -84.0;
        while lat <= 84.0 {
            assert_relative_eq!(from_mercator_lat(to_mercator_lat(lat)), lat, epsilon = 1e-9);
            lat += 3.5;
        }
    }

    #[test]
    fn test_equator_fixed_point() {
        assert_relative_eq!(to_mercator_lat(0.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(from_mercator_lat(0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_value() {
        // degrees(ln(tan(67.5°)))
        assert_relative_eq!(to_mercator_lat(45.0), 50.498_986_720_3, epsilon = 1e-6);
    }

    #[test]
    fn test_clamps_beyond_limit() {
        assert_eq!(to_mercator_lat(90.0), to_mercator_lat(84.0));
        assert_eq!(to_mercator_lat(-90.0), to_mercator_lat(-84.0));
        assert_eq!(to_mercator_lat(85.0), to_mercator_lat(84.0));
        assert!(to_mercator_lat(90.0).is_finite());
    }

    #[test]
    fn test_antisymmetric() {
        for lat in [10.0, 45.0, 83.9] {
            assert_relative_eq!(
                to_mercator_lat(-lat),
                -to_mercator_lat(lat),
                epsilon = 1e-9
            );
        }
    }
}
