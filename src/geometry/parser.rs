//! Parsers for the two textual coordinate formats the engine accepts: plain
//! delimited pairs `"(x,y),(x1,y1),..."` and the WKT subset listed in
//! [`GeometryKind`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CartaError;
use crate::geometry::{GeoPoint, GeometryKind, Ring, WktFeature};

static PAIR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?\d+\.?\d*)\s*,\s*(-?\d+\.?\d*)").unwrap());

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+\.?\d*$").unwrap());

/// Extract every `x,y` pair of signed decimals from `text`, in order of
/// appearance.
///
/// Anything that does not match is skipped silently; an input with zero
/// matches yields an empty vec, not an error. Numbers follow `-?\d+\.?\d*`
/// (no leading dot, no exponent) and the comma tolerates whitespace around
/// it.
pub fn parse_coord_list(text: &str) -> Vec<GeoPoint> {
    PAIR_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let lon = caps[1].parse().ok()?;
            let lat = caps[2].parse().ok()?;
            Some(GeoPoint::new(lon, lat))
        })
        .collect()
}

/// Parse a WKT string into typed features.
///
/// Supported keywords: `POINT`, `MULTIPOINT`, `LINESTRING`,
/// `MULTILINESTRING`, `POLYGON`, `MULTIPOLYGON` and `GEOMETRYCOLLECTION`
/// (which recurses into its comma-joined members and concatenates their
/// features). An unrecognized keyword or a body that does not tokenize into
/// numeric pairs yields `Ok(vec![])`; callers treat the absence of features
/// as invalid input. Unbalanced brackets are the only hard error.
pub fn parse_wkt(text: &str) -> Result<Vec<WktFeature>, CartaError> {
    let mut features = Vec::new();
    parse_geometry(text.trim(), &mut features)?;
    Ok(features)
}

fn keyword_kind(word: &str) -> Option<GeometryKind> {
    match word {
        "POINT" => Some(GeometryKind::Point),
        "MULTIPOINT" => Some(GeometryKind::MultiPoint),
        "LINESTRING" => Some(GeometryKind::LineString),
        "MULTILINESTRING" => Some(GeometryKind::MultiLineString),
        "POLYGON" => Some(GeometryKind::Polygon),
        "MULTIPOLYGON" => Some(GeometryKind::MultiPolygon),
        "GEOMETRYCOLLECTION" => Some(GeometryKind::GeometryCollection),
        _ => None,
    }
}

fn parse_geometry(text: &str, out: &mut Vec<WktFeature>) -> Result<(), CartaError> {
    let Some(open) = text.find('(') else {
        return Ok(());
    };
    let Some(kind) = keyword_kind(text[..open].trim()) else {
        return Ok(());
    };
    let Some(body) = outer_group(&text[open..])? else {
        return Ok(());
    };
    if kind == GeometryKind::GeometryCollection {
        for member in split_top_level(body) {
            parse_geometry(member.trim(), out)?;
        }
        return Ok(());
    }
    let Some(node) = parse_node(body)? else {
        return Ok(());
    };
    if let Some(rings) = shape_rings(kind, node) {
        out.push(WktFeature { kind, rings });
    }
    Ok(())
}

/// Intermediate body structure: either a flat list of coordinate pairs or a
/// list of parenthesized sub-groups.
enum Node {
    Pairs(Vec<GeoPoint>),
    List(Vec<Node>),
}

/// Arrange a parsed body into the per-kind ring-group nesting. `None` means
/// the body shape does not fit the keyword and the feature is dropped.
fn shape_rings(kind: GeometryKind, node: Node) -> Option<Vec<Vec<Ring>>> {
    match kind {
        // One feature, one ring holding the point list.
        GeometryKind::Point | GeometryKind::LineString => match node {
            Node::Pairs(pts) => Some(vec![vec![pts]]),
            Node::List(_) => None,
        },
        // Each point becomes its own single-point ring so it can be tagged
        // independently downstream. Both `(0 0,1 2)` and `((0 0),(1 2))`
        // spellings are accepted.
        GeometryKind::MultiPoint => match node {
            Node::Pairs(pts) => Some(explode_points(pts)),
            Node::List(items) => {
                let mut groups = Vec::new();
                for item in items {
                    match item {
                        Node::Pairs(pts) => groups.extend(explode_points(pts)),
                        Node::List(_) => return None,
                    }
                }
                Some(groups)
            }
        },
        // One feature, the parsed ring list as-is; a POLYGON's first ring is
        // the shell, later rings are holes.
        GeometryKind::MultiLineString | GeometryKind::Polygon => match node {
            Node::Pairs(pts) => Some(vec![vec![pts]]),
            Node::List(items) => collect_rings(items).map(|rings| vec![rings]),
        },
        // Each member is already a polygon's set of rings.
        GeometryKind::MultiPolygon => match node {
            Node::Pairs(_) => None,
            Node::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Node::Pairs(pts) => Some(vec![pts]),
                    Node::List(inner) => collect_rings(inner),
                })
                .collect(),
        },
        // Handled by recursion in parse_geometry.
        GeometryKind::GeometryCollection => None,
    }
}

fn explode_points(pts: Vec<GeoPoint>) -> Vec<Vec<Ring>> {
    pts.into_iter().map(|p| vec![vec![p]]).collect()
}

fn collect_rings(items: Vec<Node>) -> Option<Vec<Ring>> {
    items
        .into_iter()
        .map(|item| match item {
            Node::Pairs(pts) => Some(pts),
            Node::List(_) => None,
        })
        .collect()
}

/// Contents of the balanced group `s` opens with. `Ok(None)` when trailing
/// characters follow the closing bracket, `Err` when no closing bracket
/// balances the opener.
fn outer_group(s: &str) -> Result<Option<&str>, CartaError> {
    let mut depth = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    if s[i + 1..].trim().is_empty() {
                        return Ok(Some(&s[1..i]));
                    }
                    return Ok(None);
                }
            }
            _ => {}
        }
    }
    Err(CartaError::InvalidGeometry(format!(
        "unbalanced brackets in {s:?}"
    )))
}

/// Split on commas that sit outside any parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn parse_node(body: &str) -> Result<Option<Node>, CartaError> {
    let t = body.trim();
    if t.starts_with('(') {
        let mut items = Vec::new();
        for part in split_top_level(t) {
            let part = part.trim();
            if !part.starts_with('(') {
                return Ok(None);
            }
            let Some(inner) = outer_group(part)? else {
                return Ok(None);
            };
            let Some(node) = parse_node(inner)? else {
                return Ok(None);
            };
            items.push(node);
        }
        Ok(Some(Node::List(items)))
    } else {
        Ok(pair_list(t).map(Node::Pairs))
    }
}

/// Tokenize `"x y, x1 y1, ..."` strictly; any malformed chunk invalidates
/// the whole list.
fn pair_list(t: &str) -> Option<Vec<GeoPoint>> {
    let mut pts = Vec::new();
    for chunk in t.split(',') {
        let mut tokens = chunk.split_whitespace();
        let lon = full_number(tokens.next()?)?;
        let lat = full_number(tokens.next()?)?;
        if tokens.next().is_some() {
            return None;
        }
        pts.push(GeoPoint::new(lon, lat));
    }
    Some(pts)
}

fn full_number(token: &str) -> Option<f64> {
    if !NUMBER_REGEX.is_match(token) {
        return None;
    }
    token.parse().ok()
}
