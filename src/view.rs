//! View transform: projection + Z-axis rotation + scale/offset composed into
//! device points, and the inverse path back to geographic coordinates.

use std::f64::consts::PI;

use crate::geometry::{DevicePoint, GeoPoint};
use crate::proj::mercator::{from_mercator_lat, to_mercator_lat};
use crate::proj::orthographic::{from_orthographic, to_orthographic};
use crate::proj::ProjectionMode;

/// Angular-to-unit conversion: one degree maps to 3600 drawing units.
pub const DELTA: f64 = 3600.0;

/// Mutable view record owned by the [`ProjectionController`].
///
/// `scale_x`/`scale_y` derive from the viewport size in degrees and change
/// only when the projection mode changes; `half_x`/`half_y` act as the
/// projection origin offset.
///
/// [`ProjectionController`]: crate::controller::ProjectionController
#[derive(Clone, Copy, Debug)]
pub struct ViewState {
    pub mode: ProjectionMode,
    /// Geographic point mapped to the viewport center; pivot for rotation
    /// and the sphere orientation in Orthographic mode.
    pub center: GeoPoint,
    pub z_rotation_deg: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub half_x: f64,
    pub half_y: f64,
}

impl ViewState {
    pub fn new(mode: ProjectionMode, viewport_x_deg: f64, viewport_y_deg: f64) -> Self {
        let (scale_x, scale_y) = mode_scales(mode, viewport_x_deg, viewport_y_deg);
        ViewState {
            mode,
            center: GeoPoint::new(0.0, 0.0),
            z_rotation_deg: 0.0,
            scale_x,
            scale_y,
            half_x: scale_x / 2.0,
            half_y: scale_y / 2.0,
        }
    }

    /// View center in projected (pre-scale) coordinates; the rotation pivot
    /// for the flat projections.
    fn projected_center(&self) -> DevicePoint {
        let lat = match self.mode {
            ProjectionMode::Mercator => to_mercator_lat(self.center.lat),
            _ => self.center.lat,
        };
        DevicePoint::new(self.center.lon, lat)
    }
}

/// Per-mode scale from a viewport size in degrees. Mercator's vertical scale
/// spans the mapped pole latitude instead of 90°.
pub(crate) fn mode_scales(mode: ProjectionMode, viewport_x: f64, viewport_y: f64) -> (f64, f64) {
    match mode {
        ProjectionMode::Linear | ProjectionMode::Orthographic => {
            (viewport_x * DELTA, viewport_y * DELTA)
        }
        ProjectionMode::Mercator => (
            viewport_x * DELTA,
            to_mercator_lat(90.0) * DELTA * viewport_y / 90.0,
        ),
    }
}

/// Rotate `point` around `pivot` by `angle_deg` (negated when `reverse`).
///
/// A zero-length vector comes back unchanged; degenerate rotation is not an
/// error. The angle of the offset vector is recovered through a clamped
/// `acos` and corrected to the full `[0, 2π)` range by the y-offset sign,
/// with `point.y == pivot.y` taking the non-negative branch.
pub fn rotate_z(point: DevicePoint, pivot: DevicePoint, angle_deg: f64, reverse: bool) -> DevicePoint {
    if angle_deg == 0.0 {
        return point;
    }
    let roll = if reverse { -angle_deg } else { angle_deg }.to_radians();
    let dx = pivot.x - point.x;
    let dy = point.y - pivot.y;
    let r = (dx * dx + dy * dy).sqrt();
    if r == 0.0 {
        return point;
    }
    let mut a = (dx / r).clamp(-1.0, 1.0).acos();
    if point.y < pivot.y {
        a = 2.0 * PI - a;
    }
    DevicePoint::new(pivot.x - r * (roll + a).cos(), pivot.y + r * (roll + a).sin())
}

/// Geographic point → device point under `view`, with a final uniform `zoom`
/// in `(0, 1]`.
///
/// `None` only in Orthographic mode, for points on the hidden hemisphere:
/// callers skip those points rather than treating them as failures.
pub fn forward(geo: GeoPoint, view: &ViewState, zoom: f64) -> Option<DevicePoint> {
    match view.mode {
        ProjectionMode::Linear | ProjectionMode::Mercator => {
            let y = match view.mode {
                ProjectionMode::Mercator => to_mercator_lat(geo.lat),
                _ => geo.lat,
            };
            let p = rotate_z(
                DevicePoint::new(geo.lon, y),
                view.projected_center(),
                view.z_rotation_deg,
                false,
            );
            // Top-down device convention: flat projections invert vertically.
            Some(DevicePoint::new(
                (p.x * DELTA + view.half_x) * zoom,
                (-p.y * DELTA + view.half_y) * zoom,
            ))
        }
        ProjectionMode::Orthographic => {
            // The sphere handles its own orientation; no vertical inversion.
            let p = to_orthographic(geo, view.center)?;
            let p = rotate_z(p, DevicePoint::ORIGIN, view.z_rotation_deg, false);
            Some(DevicePoint::new(
                (p.x * DELTA + view.half_x) * zoom,
                (p.y * DELTA + view.half_y) * zoom,
            ))
        }
    }
}

/// Device point → geographic point; the mathematical inverse of [`forward`].
///
/// With `apply_sphere` set and the mode Orthographic the point is solved on
/// the sphere, yielding `None` outside the projected disc. Otherwise the
/// flat path applies: un-rotate around the projected center, then undo the
/// Mercator latitude only in Mercator mode.
pub fn inverse(device: DevicePoint, view: &ViewState, zoom: f64, apply_sphere: bool) -> Option<GeoPoint> {
    let x = (device.x / zoom - view.half_x) / DELTA;
    let y = (device.y / zoom - view.half_y) / DELTA;
    if view.mode.is_spherical() && apply_sphere {
        let p = rotate_z(
            DevicePoint::new(x, y),
            DevicePoint::ORIGIN,
            view.z_rotation_deg,
            true,
        );
        return from_orthographic(p, view.center);
    }
    let p = rotate_z(
        DevicePoint::new(x, -y),
        view.projected_center(),
        view.z_rotation_deg,
        true,
    );
    let lat = match view.mode {
        ProjectionMode::Mercator => from_mercator_lat(p.y),
        _ => p.y,
    };
    Some(GeoPoint::new(p.x, lat))
}
