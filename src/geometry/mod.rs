//! Geographic and device coordinate types, typed WKT features and the
//! graticule generator.

pub mod parser;

/// A geographic coordinate in degrees: `lon` east-positive, `lat`
/// north-positive.
///
/// Stored unclamped; latitude limits (e.g. ±84° for Mercator) are applied at
/// transform time, not here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        GeoPoint { lon, lat }
    }

    /// Longitude wrapped into `(-180, 180]`, latitude untouched.
    pub fn normalized(self) -> Self {
        GeoPoint::new(wrap_degrees(self.lon), self.lat)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        GeoPoint::new(lon, lat)
    }
}

/// A point in abstract drawing units (pre-scale), y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub const ORIGIN: DevicePoint = DevicePoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        DevicePoint { x, y }
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(deg: f64) -> f64 {
    // In-range values pass through exactly; re-deriving them through
    // rem_euclid perturbs the low bits.
    if deg > -180.0 && deg <= 180.0 {
        return deg;
    }
    let w = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if w == -180.0 {
        180.0
    } else {
        w
    }
}

/// Geometry kinds of the supported WKT subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

/// One ordered contour of a geometry. Insertion order is significant and a
/// closed shape is not auto-closed; callers supply the closing duplicate
/// point themselves.
pub type Ring = Vec<GeoPoint>;

/// One parsed WKT feature.
///
/// `rings` nests ring-group → ring → points, so a POLYGON's shell and holes
/// stay distinguishable sub-sequences and a MULTIPOLYGON keeps one group per
/// member polygon. A GEOMETRYCOLLECTION parses into several independent
/// features, so [`GeometryKind::GeometryCollection`] never appears here.
#[derive(Clone, Debug, PartialEq)]
pub struct WktFeature {
    pub kind: GeometryKind,
    pub rings: Vec<Vec<Ring>>,
}

/// Meridian and parallel rings covering the full sphere, one line every
/// `step_deg` degrees with a vertex every `step_deg` along it.
pub fn graticule(step_deg: f64) -> Vec<Ring> {
    let mut rings = Vec::new();
    let mut lon = -180.0;
    while lon <= 180.0 {
        let mut meridian = Vec::new();
        let mut lat = -90.0;
        while lat <= 90.0 {
            meridian.push(GeoPoint::new(lon, lat));
            lat += step_deg;
        }
        rings.push(meridian);
        lon += step_deg;
    }
    let mut lat = -90.0;
    while lat <= 90.0 {
        let mut parallel = Vec::new();
        let mut lon = -180.0;
        while lon <= 180.0 {
            parallel.push(GeoPoint::new(lon, lat));
            lon += step_deg;
        }
        rings.push(parallel);
        lat += step_deg;
    }
    rings
}
