//! Projection controller: owns the [`ViewState`] and is the single
//! integration point for the (external) rendering layer.
//!
//! The engine is synchronous and single-threaded; concurrent callers must
//! serialize access to the controller themselves.

use crate::geodesic::{interpolate_great_circle, DEFAULT_STEP_KM};
use crate::geometry::{wrap_degrees, DevicePoint, GeoPoint};
use crate::proj::ProjectionMode;
use crate::view::{self, mode_scales, ViewState};

/// Default scrollable map size in degrees (360+180 by 180+90).
pub const DEFAULT_VIEWPORT_X_DEG: f64 = 540.0;
pub const DEFAULT_VIEWPORT_Y_DEG: f64 = 270.0;

pub struct ProjectionController {
    view: ViewState,
    viewport_x_deg: f64,
    viewport_y_deg: f64,
}

impl ProjectionController {
    pub fn new(mode: ProjectionMode) -> Self {
        Self::with_viewport(mode, DEFAULT_VIEWPORT_X_DEG, DEFAULT_VIEWPORT_Y_DEG)
    }

    pub fn with_viewport(mode: ProjectionMode, viewport_x_deg: f64, viewport_y_deg: f64) -> Self {
        ProjectionController {
            view: ViewState::new(mode, viewport_x_deg, viewport_y_deg),
            viewport_x_deg,
            viewport_y_deg,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Switch projection and/or recenter, recomputing the per-mode scales.
    ///
    /// Returns `true` when the view changed and the caller must re-project
    /// all live geometry; a request for the current mode with no explicit
    /// center is an idempotent no-op. The stored center carries over across
    /// mode switches, so entering Orthographic picks up the current visible
    /// center as the sphere pivot and leaving it does the reverse.
    pub fn change_projection(&mut self, mode: ProjectionMode, center: Option<GeoPoint>) -> bool {
        if mode == self.view.mode && center.is_none() {
            return false;
        }
        if let Some(c) = center {
            self.view.center = c.normalized();
        }
        let (scale_x, scale_y) = mode_scales(mode, self.viewport_x_deg, self.viewport_y_deg);
        self.view.scale_x = scale_x;
        self.view.scale_y = scale_y;
        self.view.half_x = scale_x / 2.0;
        self.view.half_y = scale_y / 2.0;
        self.view.mode = mode;
        true
    }

    pub fn set_center(&mut self, center: GeoPoint) {
        self.view.center = center.normalized();
    }

    /// Add to the Z-axis view rotation.
    pub fn rotate_by(&mut self, delta_deg: f64) {
        self.view.z_rotation_deg += delta_deg;
    }

    /// Nudge the view center; both axes wrap into `(-180, 180]` so the
    /// sphere can be turned past the dateline and over the poles.
    pub fn turn_by(&mut self, dlon: f64, dlat: f64) {
        let c = self.view.center;
        self.view.center = GeoPoint::new(wrap_degrees(c.lon + dlon), wrap_degrees(c.lat + dlat));
    }

    /// Project a batch of coordinates. `None` entries mark points on the
    /// hidden hemisphere in Orthographic mode; callers skip them.
    pub fn to_points(&self, coords: &[GeoPoint], zoom: f64) -> Vec<Option<DevicePoint>> {
        coords
            .iter()
            .map(|&c| view::forward(c, &self.view, zoom))
            .collect()
    }

    /// Geographic coordinate under a device point, for cursor feedback.
    pub fn from_point(&self, device: DevicePoint, zoom: f64, apply_sphere: bool) -> Option<GeoPoint> {
        view::inverse(device, &self.view, zoom, apply_sphere)
    }

    /// Project a polyline for drawing. Under Orthographic the segments are
    /// densified by great-circle interpolation first, so long edges follow
    /// the sphere instead of cutting across the disc.
    pub fn project_path(&self, coords: &[GeoPoint], zoom: f64) -> Vec<Option<DevicePoint>> {
        if self.view.mode.is_spherical() && coords.len() > 1 {
            let mut dense = Vec::new();
            for pair in coords.windows(2) {
                dense.extend(interpolate_great_circle(pair[0], pair[1], DEFAULT_STEP_KM));
            }
            self.to_points(&dense, zoom)
        } else {
            self.to_points(coords, zoom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::mercator::to_mercator_lat;
    use crate::view::DELTA;
    use approx::assert_relative_eq;

    #[test]
    fn test_change_projection_noop() {
        let mut carta = ProjectionController::new(ProjectionMode::Linear);
        let before = *carta.view();
        assert!(!carta.change_projection(ProjectionMode::Linear, None));
        assert_eq!(carta.view().scale_x, before.scale_x);
        assert_eq!(carta.view().center, before.center);
    }

    #[test]
    fn test_change_projection_same_mode_with_center() {
        let mut carta = ProjectionController::new(ProjectionMode::Linear);
        assert!(carta.change_projection(ProjectionMode::Linear, Some(GeoPoint::new(190.0, 10.0))));
        // Explicit center is normalized into (-180, 180].
        assert_eq!(carta.view().center, GeoPoint::new(-170.0, 10.0));
    }

    #[test]
    fn test_mercator_scale_formula() {
        let mut carta = ProjectionController::new(ProjectionMode::Linear);
        assert!(carta.change_projection(ProjectionMode::Mercator, None));
        let v = carta.view();
        assert_relative_eq!(v.scale_x, 540.0 * DELTA, epsilon = 1e-9);
        assert_relative_eq!(
            v.scale_y,
            to_mercator_lat(90.0) * DELTA * 270.0 / 90.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(v.half_y, v.scale_y / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_center_carries_into_orthographic() {
        let mut carta = ProjectionController::new(ProjectionMode::Linear);
        carta.set_center(GeoPoint::new(37.61, 55.75));
        assert!(carta.change_projection(ProjectionMode::Orthographic, None));
        assert_eq!(carta.view().center, GeoPoint::new(37.61, 55.75));
        // And back out again.
        assert!(carta.change_projection(ProjectionMode::Linear, None));
        assert_eq!(carta.view().center, GeoPoint::new(37.61, 55.75));
    }

    #[test]
    fn test_turn_by_wraps_both_axes() {
        let mut carta = ProjectionController::new(ProjectionMode::Orthographic);
        carta.set_center(GeoPoint::new(175.0, 0.0));
        carta.turn_by(10.0, 0.0);
        assert_relative_eq!(carta.view().center.lon, -175.0, epsilon = 1e-12);
        carta.turn_by(0.0, -190.0);
        assert_relative_eq!(carta.view().center.lat, 170.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_by_accumulates() {
        let mut carta = ProjectionController::new(ProjectionMode::Linear);
        carta.rotate_by(10.0);
        carta.rotate_by(10.0);
        carta.rotate_by(-30.0);
        assert_eq!(carta.view().z_rotation_deg, -10.0);
    }

    #[test]
    fn test_to_points_marks_hidden() {
        let carta = ProjectionController::new(ProjectionMode::Orthographic);
        let pts = carta.to_points(
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(150.0, 0.0)],
            1.0,
        );
        assert!(pts[0].is_some());
        assert!(pts[1].is_none());
    }

    #[test]
    fn test_project_path_densifies_on_sphere() {
        let line = [GeoPoint::new(0.0, 0.0), GeoPoint::new(60.0, 0.0)];
        let mut carta = ProjectionController::new(ProjectionMode::Linear);
        assert_eq!(carta.project_path(&line, 1.0).len(), 2);
        carta.change_projection(ProjectionMode::Orthographic, None);
        // 60 degrees of equator is ~6680 km: 13 segments, 14 points.
        assert!(carta.project_path(&line, 1.0).len() > 2);
    }

    #[test]
    fn test_cursor_feedback_roundtrip() {
        let mut carta = ProjectionController::new(ProjectionMode::Mercator);
        carta.set_center(GeoPoint::new(10.0, 48.0));
        let geo = GeoPoint::new(37.61, 55.75);
        let p = carta.to_points(&[geo], 0.5)[0].unwrap();
        let back = carta.from_point(p, 0.5, false).unwrap();
        assert_relative_eq!(back.lon, geo.lon, epsilon = 1e-9);
        assert_relative_eq!(back.lat, geo.lat, epsilon = 1e-9);
    }
}
