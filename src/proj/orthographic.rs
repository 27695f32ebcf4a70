//! Orthographic (globe) projection around an arbitrary view center.
//!
//! Forward culls the hidden hemisphere; the inverse is the classic GCTP
//! inverse-orthographic formulation. Device coordinates are in
//! degree-equivalent units (1 radian of disc radius = 180/π units) with y
//! growing downward, matching the view transform's convention before
//! scaling.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::{wrap_degrees, DevicePoint, GeoPoint};

const EPSLN: f64 = 1.0e-10;

fn asinz(v: f64) -> f64 {
    v.clamp(-1.0, 1.0).asin()
}

/// Project `point` onto the hemisphere visible around `center`.
///
/// `None` means the point lies on the far hemisphere and is not drawable,
/// an expected outcome rather than an error.
pub fn to_orthographic(point: GeoPoint, center: GeoPoint) -> Option<DevicePoint> {
    let lon = point.lon.to_radians();
    let lat = point.lat.to_radians();
    let clat = center.lat.to_radians();
    // Shifting the center meridian by π folds the visibility test into a
    // single sign check around the view center.
    let clon = center.lon.to_radians() + PI;
    let cos_dlon = (clon - lon).cos();
    if lat.sin() * clat.sin() - lat.cos() * clat.cos() * cos_dlon <= 0.0 {
        return None;
    }
    Some(DevicePoint::new(
        (lat.cos() * (clon - lon).sin()).to_degrees(),
        (-lat.sin() * clat.cos() - clat.sin() * lat.cos() * cos_dlon).to_degrees(),
    ))
}

/// Exact inverse of [`to_orthographic`].
///
/// `None` when the device point lies outside the projected disc (rho > 1).
pub fn from_orthographic(point: DevicePoint, center: GeoPoint) -> Option<GeoPoint> {
    let x = point.x.to_radians();
    // Back to north-up for the spherical solve.
    let y = -point.y.to_radians();
    let clon = center.lon.to_radians();
    let clat = center.lat.to_radians();

    let rh = (x * x + y * y).sqrt() + EPSLN;
    if rh > 1.0 {
        return None;
    }
    let z = asinz(rh);
    let (sin_z, cos_z) = z.sin_cos();
    let (sin_c, cos_c) = clat.sin_cos();

    let lat = asinz(cos_z * sin_c + y * sin_z * cos_c / rh);
    let lon = if (clat.abs() - FRAC_PI_2).abs() <= EPSLN {
        // Center at a pole: longitude comes straight from the device angle.
        if clat >= 0.0 {
            clon + x.atan2(-y)
        } else {
            clon - (-x).atan2(y)
        }
    } else {
        let con = cos_z - sin_c * lat.sin();
        if con.abs() < EPSLN && x.abs() < EPSLN {
            clon
        } else {
            clon + (x * sin_z * cos_c).atan2(con * rh)
        }
    };

    Some(GeoPoint::new(wrap_degrees(lon.to_degrees()), lat.to_degrees()))
}
