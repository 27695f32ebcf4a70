//! Cartographic projection and geometry engine.
//!
//! Projects geographic coordinates (degrees) into abstract drawing units
//! under three projections (plate carrée, spherical Mercator, orthographic
//! globe), with a Z-axis view rotation, great-circle math and a WKT-subset
//! parser for loading geometry.
//!
//! ```
//! use carta_core::{GeoPoint, ProjectionController, ProjectionMode};
//!
//! let mut carta = ProjectionController::new(ProjectionMode::Mercator);
//! carta.set_center(GeoPoint::new(37.61, 55.75));
//! let points = carta.to_points(&[GeoPoint::new(30.31, 59.94)], 1.0);
//! assert!(points[0].is_some());
//! ```

pub mod controller;
pub mod error;
pub mod geodesic;
pub mod geometry;
pub mod proj;
pub mod view;

pub use controller::ProjectionController;
pub use error::CartaError;
pub use geometry::parser::{parse_coord_list, parse_wkt};
pub use geometry::{DevicePoint, GeoPoint, GeometryKind, Ring, WktFeature};
pub use proj::ProjectionMode;
pub use view::{rotate_z, ViewState, DELTA};
