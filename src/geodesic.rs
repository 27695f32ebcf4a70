//! Great-circle distance and interpolation over the sphere.
//!
//! Interpolation is deliberately linear in degree space, not spherical slerp:
//! it reproduces the segment subdivision of the map renderer this engine was
//! extracted from, which is inaccurate near the poles over long distances
//! but kept for compatibility.

use crate::geometry::GeoPoint;

/// Equatorial Earth radius used throughout, in km.
pub const EARTH_RADIUS_KM: f64 = 6378.136;

/// Default subdivision step for [`interpolate_great_circle`], in km.
pub const DEFAULT_STEP_KM: f64 = 500.0;

/// Length of the great circle between two points, in km.
pub fn great_circle_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lon_a, lat_a) = (a.lon.to_radians(), a.lat.to_radians());
    let (lon_b, lat_b) = (b.lon.to_radians(), b.lat.to_radians());
    let cosine = lat_a.cos() * lat_b.cos() * (lon_a - lon_b).cos() + lat_a.sin() * lat_b.sin();
    // Floating rounding can push the cosine just outside [-1, 1].
    EARTH_RADIUS_KM * cosine.clamp(-1.0, 1.0).acos()
}

/// Accumulated great-circle length of a polyline, in km.
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| great_circle_distance_km(pair[0], pair[1]))
        .sum()
}

/// Subdivide the segment `a..b` into roughly `step_km`-long pieces.
///
/// Returns `[a, b]` unchanged when the distance is below one step, otherwise
/// `segments + 1` points starting at `a` and ending at `b`. A non-positive
/// `step_km` disables subdivision.
pub fn interpolate_great_circle(a: GeoPoint, b: GeoPoint, step_km: f64) -> Vec<GeoPoint> {
    if step_km <= 0.0 {
        return vec![a, b];
    }
    let segments = (great_circle_distance_km(a, b) / step_km) as usize;
    if segments == 0 {
        return vec![a, b];
    }
    let dlon = (b.lon - a.lon) / segments as f64;
    let dlat = (b.lat - a.lat) / segments as f64;
    (0..=segments)
        .map(|i| GeoPoint::new(a.lon + dlon * i as f64, a.lat + dlat * i as f64))
        .collect()
}
