//! Planar geometry for areas of interest: points, open polylines, closed rings, and trimming a
//! ring with a hand-drawn cutting line.
//!
//! Coordinates are longitude/latitude, but every distance and area here is planar, measured in
//! raw coordinate units. That keeps snapping distances, epsilons, and area comparisons coherent
//! with each other.

#[macro_use]
extern crate log;

mod bounds;
mod gps;
mod line;
mod polyline;
mod pt;
mod ring;
mod split;

pub use crate::bounds::Bounds;
pub use crate::gps::LonLat;
pub use crate::line::Line;
pub use crate::polyline::{LineLocation, PolyLine};
pub use crate::pt::{HashablePt2D, Pt2D};
pub use crate::ring::{
    clean_ring, deserialize_ring_from_geojson, serialize_ring_as_geojson, signed_area, Ring,
};
pub use crate::split::{split, split_with, SplitOptions};

/// Points closer than this, in coordinate units, are the same point.
pub const EPSILON_DIST: f64 = 1e-6;

/// Loops enclosing less than this, in squared coordinate units, enclose nothing.
pub const EPSILON_AREA: f64 = 1e-12;

fn geojson_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Parses GeoJSON positions, rejecting anything without two finite coordinates.
fn pts_from_geojson(raw: &[Vec<f64>]) -> anyhow::Result<Vec<Pt2D>> {
    let mut pts = Vec::new();
    for pos in raw {
        if pos.len() < 2 || !pos[0].is_finite() || !pos[1].is_finite() {
            anyhow::bail!("Bad GeoJSON position {:?}", pos);
        }
        pts.push(Pt2D::new(pos[0], pos[1]));
    }
    Ok(pts)
}

fn pts_to_geojson(pts: &[Pt2D]) -> Vec<Vec<f64>> {
    pts.iter().map(|pt| vec![pt.x(), pt.y()]).collect()
}
