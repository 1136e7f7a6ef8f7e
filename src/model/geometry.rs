//! Geospatial shape literals from the BQS grammar.
//!
//! Shapes are kept in decoded form (vertices, center/radius, axes) rather
//! than re-encoded as WKT; the search executor owns any further conversion.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A latitude/longitude pair in decimal degrees, WGS-84.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Linear units accepted by CIRCLE/ELLIPSE literals and relative geo operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Feet,
    Meters,
    Kilometers,
    NauticalMiles,
    StatuteMiles,
}

impl DistanceUnit {
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Feet => value * 0.3048,
            DistanceUnit::Meters => value,
            DistanceUnit::Kilometers => value * 1000.0,
            DistanceUnit::NauticalMiles => value * 1852.0,
            DistanceUnit::StatuteMiles => value * 1609.344,
        }
    }
}

pub type CoordSeq = SmallVec<[Coord; 4]>;

/// A BQS geo literal. Axis lengths and radii are normalized to meters
/// during parsing; rotation is degrees clockwise from north.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum Shape {
    Point(Coord),
    Rectangle { upper_left: Coord, lower_right: Coord },
    Polygon(CoordSeq),
    Line(CoordSeq),
    Circle { center: Coord, radius_m: f64 },
    Ellipse { center: Coord, major_m: f64, minor_m: f64, rotation_deg: f64 },
}

impl Shape {
    /// Number of explicit coordinates in the literal — vertices for
    /// polygons/lines, corner pair for rectangles, one for the rest.
    pub fn vertex_count(&self) -> usize {
        match self {
            Shape::Point(_) | Shape::Circle { .. } | Shape::Ellipse { .. } => 1,
            Shape::Rectangle { .. } => 2,
            Shape::Polygon(coords) | Shape::Line(coords) => coords.len(),
        }
    }

    pub fn is_rectangle(&self) -> bool {
        matches!(self, Shape::Rectangle { .. })
    }

    /// Axis-aligned bounding rectangle. Circles and ellipses are boxed by
    /// their radius/semi-major axis converted through the local degree
    /// lengths at the center latitude.
    pub fn bounding_box(&self) -> Shape {
        match self {
            Shape::Rectangle { .. } => self.clone(),
            Shape::Point(c) => Shape::Rectangle { upper_left: *c, lower_right: *c },
            Shape::Polygon(coords) | Shape::Line(coords) => bbox_of(coords),
            Shape::Circle { center, radius_m } => radial_bbox(*center, *radius_m),
            Shape::Ellipse { center, major_m, .. } => radial_bbox(*center, *major_m / 2.0),
        }
    }
}

fn bbox_of(coords: &[Coord]) -> Shape {
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lon = f64::MAX;
    let mut max_lon = f64::MIN;
    for c in coords {
        min_lat = min_lat.min(c.lat);
        max_lat = max_lat.max(c.lat);
        min_lon = min_lon.min(c.lon);
        max_lon = max_lon.max(c.lon);
    }
    Shape::Rectangle {
        upper_left: Coord::new(max_lat, min_lon),
        lower_right: Coord::new(min_lat, max_lon),
    }
}

fn radial_bbox(center: Coord, radius_m: f64) -> Shape {
    let dlat = radius_m / lat_degree_length_m(center.lat);
    let dlon = radius_m / lon_degree_length_m(center.lat);
    Shape::Rectangle {
        upper_left: Coord::new(center.lat + dlat, center.lon - dlon),
        lower_right: Coord::new(center.lat - dlat, center.lon + dlon),
    }
}

/// Meters per degree of latitude at the given latitude (WGS-84 series).
pub fn lat_degree_length_m(lat_deg: f64) -> f64 {
    let lat = lat_deg.to_radians();
    111_132.92 - 559.82 * (2.0 * lat).cos() + 1.175 * (4.0 * lat).cos()
        - 0.0023 * (6.0 * lat).cos()
}

/// Meters per degree of longitude at the given latitude (WGS-84 series).
pub fn lon_degree_length_m(lat_deg: f64) -> f64 {
    let lat = lat_deg.to_radians();
    111_412.84 * lat.cos() - 93.5 * (3.0 * lat).cos() + 0.118 * (5.0 * lat).cos()
}

/// Combine DMS components into signed decimal degrees. South and west
/// hemispheres are negative; minutes and seconds must sit below 60.
pub fn dms_to_decimal(deg: f64, min: f64, sec: f64, hemisphere: &str) -> Option<f64> {
    let sign = match hemisphere {
        "N" | "n" | "E" | "e" => 1.0,
        "S" | "s" | "W" | "w" => -1.0,
        _ => return None,
    };
    if !(0.0..60.0).contains(&min) || !(0.0..60.0).contains(&sec) {
        return None;
    }
    Some(sign * (deg + min / 60.0 + sec / 3600.0))
}
