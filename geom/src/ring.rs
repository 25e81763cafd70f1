use std::fmt;

use anyhow::{anyhow, bail, Result};
use geo::{Area, Contains};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Bounds, PolyLine, Pt2D, EPSILON_DIST};

/// Like a PolyLine, but closed. A single exterior boundary; holes aren't supported.
///
/// Not `Deserialize`; parse through `deserialize_ring_from_geojson`, which runs the checks in
/// `Ring::new`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    // first equals last
    pts: Vec<Pt2D>,
}

impl Ring {
    pub fn new(pts: Vec<Pt2D>) -> Result<Ring> {
        if pts.len() < 4 {
            bail!("Can't make a ring with only {} points", pts.len());
        }
        if pts.first() != pts.last() {
            bail!("Can't make a ring with mismatching first/last points");
        }
        Ok(Ring { pts })
    }

    pub fn must_new(pts: Vec<Pt2D>) -> Ring {
        Ring::new(pts).unwrap()
    }

    pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Ring> {
        match &geometry.value {
            geojson::Value::Polygon(rings) => {
                let outer = rings
                    .first()
                    .ok_or_else(|| anyhow!("Polygon has no rings"))?;
                if rings.len() > 1 {
                    warn!("Ignoring {} holes in a polygon", rings.len() - 1);
                }
                Ring::new(crate::pts_from_geojson(outer)?)
            }
            other => bail!(
                "Expected a Polygon, got a {}",
                crate::geojson_type_name(other)
            ),
        }
    }

    pub fn to_geojson(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Polygon(vec![crate::pts_to_geojson(
            &self.pts,
        )]))
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    /// The edges of the ring as one open line, in the same vertex order. The line starts and ends
    /// at the same point.
    pub fn to_boundary(&self) -> PolyLine {
        PolyLine::unchecked_new(self.pts.clone())
    }

    /// Positive when the ring winds counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.pts)
    }

    /// The magnitude of the area, regardless of winding order.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn get_bounds(&self) -> Bounds {
        Bounds::from(&self.pts)
    }

    /// Strictly inside; points on the boundary don't count.
    pub fn contains_pt(&self, pt: Pt2D) -> bool {
        self.to_geo().contains(&geo::Point::from(pt))
    }

    pub(crate) fn to_geo(&self) -> geo::Polygon {
        self.clone().into()
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Ring::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}

impl From<Ring> for geo::Polygon {
    fn from(ring: Ring) -> Self {
        let exterior: Vec<geo::Coordinate<f64>> =
            ring.pts.into_iter().map(geo::Coordinate::from).collect();
        geo::Polygon::new(geo::LineString::from(exterior), Vec::new())
    }
}

/// Shoelace area of a loop of points. The loop doesn't need to be explicitly closed. Positive when
/// the points wind counter-clockwise.
pub fn signed_area(pts: &[Pt2D]) -> f64 {
    let exterior: Vec<geo::Coordinate<f64>> =
        pts.iter().map(|pt| geo::Coordinate::from(*pt)).collect();
    geo::Polygon::new(geo::LineString::from(exterior), Vec::new()).signed_area()
}

/// Drops every point that's within `EPSILON_DIST` of the last point kept. The first point is
/// always kept. Running this twice changes nothing the second time.
pub fn clean_ring(pts: &[Pt2D]) -> Vec<Pt2D> {
    let mut result: Vec<Pt2D> = Vec::new();
    for pt in pts {
        match result.last() {
            Some(last) if last.approx_eq(*pt, EPSILON_DIST) => {}
            _ => result.push(*pt),
        }
    }
    result
}

/// Use with `#[serde(serialize_with)]` to store a Ring as a GeoJSON Polygon geometry.
pub fn serialize_ring_as_geojson<S: Serializer>(
    ring: &Ring,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    ring.to_geojson().serialize(s)
}

/// The inverse of `serialize_ring_as_geojson`.
pub fn deserialize_ring_from_geojson<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Ring, D::Error> {
    let geometry = geojson::Geometry::deserialize(d)?;
    Ring::from_geojson(&geometry).map_err(serde::de::Error::custom)
}
