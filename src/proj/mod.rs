//! Projection implementations and the mode selector.

pub mod mercator;
pub mod orthographic;

/// Projection applied by the view transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Plate carrée: longitude and latitude used directly as plane
    /// coordinates.
    Linear,
    /// Spherical Mercator, latitude clamped to ±84°.
    Mercator,
    /// Globe view around the current center, far hemisphere culled.
    Orthographic,
}

impl ProjectionMode {
    /// True for modes that project onto the sphere rather than a flat plane.
    pub fn is_spherical(self) -> bool {
        matches!(self, ProjectionMode::Orthographic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_orthographic_is_spherical() {
        assert!(ProjectionMode::Orthographic.is_spherical());
        assert!(!ProjectionMode::Linear.is_spherical());
        assert!(!ProjectionMode::Mercator.is_spherical());
    }
}
