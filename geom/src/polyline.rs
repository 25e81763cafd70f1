use std::fmt;

use anyhow::{bail, Result};

use crate::{Bounds, Line, Pt2D, EPSILON_DIST};

/// An open line through at least two points.
#[derive(Clone, Debug, PartialEq)]
pub struct PolyLine {
    pts: Vec<Pt2D>,
    length: f64,
}

/// Where some query point lands when it's snapped onto a `PolyLine`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineLocation {
    /// The closest point on the line
    pub pt: Pt2D,
    /// `pt` is on the segment from `pts[segment]` to `pts[segment + 1]`
    pub segment: usize,
    pub dist_along: f64,
    /// `dist_along` as a fraction of the line's total length, in [0, 1]
    pub fraction: f64,
    /// Distance from the query point to `pt`
    pub dist_away: f64,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        if pts.len() < 2 {
            bail!("Need at least two points for a PolyLine, got {}", pts.len());
        }
        Ok(PolyLine::unchecked_new(pts))
    }

    pub fn must_new(pts: Vec<Pt2D>) -> PolyLine {
        PolyLine::new(pts).unwrap()
    }

    /// Doesn't check the number of points. Only use for points that already came from a valid
    /// PolyLine or Ring.
    pub(crate) fn unchecked_new(pts: Vec<Pt2D>) -> PolyLine {
        let length = pts.windows(2).map(|pair| pair[0].dist_to(pair[1])).sum();
        PolyLine { pts, length }
    }

    pub fn from_geojson(geometry: &geojson::Geometry) -> Result<PolyLine> {
        match &geometry.value {
            geojson::Value::LineString(raw) => PolyLine::new(crate::pts_from_geojson(raw)?),
            other => bail!(
                "Expected a LineString, got a {}",
                crate::geojson_type_name(other)
            ),
        }
    }

    pub fn to_geojson(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::LineString(crate::pts_to_geojson(&self.pts)))
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn first_pt(&self) -> Pt2D {
        self.pts[0]
    }

    pub fn last_pt(&self) -> Pt2D {
        self.pts[self.pts.len() - 1]
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.pts.windows(2).map(|pair| Line::new(pair[0], pair[1]))
    }

    pub fn get_bounds(&self) -> Bounds {
        Bounds::from(&self.pts)
    }

    /// Snaps `query` onto the closest point of any segment. When several segments are equally
    /// close, the first one in traversal order wins. Returns `None` for a line with no length,
    /// where there's nothing meaningful to snap to.
    pub fn nearest_location(&self, query: Pt2D) -> Option<LineLocation> {
        if self.length < EPSILON_DIST {
            return None;
        }

        let mut best: Option<LineLocation> = None;
        let mut dist_so_far = 0.0;
        for (idx, line) in self.lines().enumerate() {
            let (pt, percent) = line.project_pt(query);
            let dist_away = pt.dist_to(query);
            if best.map(|b| dist_away < b.dist_away).unwrap_or(true) {
                let dist_along = dist_so_far + percent * line.length();
                best = Some(LineLocation {
                    pt,
                    segment: idx,
                    dist_along,
                    fraction: (dist_along / self.length).clamp(0.0, 1.0),
                    dist_away,
                });
            }
            dist_so_far += line.length();
        }
        best
    }

    pub fn start_location(&self) -> LineLocation {
        LineLocation {
            pt: self.first_pt(),
            segment: 0,
            dist_along: 0.0,
            fraction: 0.0,
            dist_away: 0.0,
        }
    }

    pub fn end_location(&self) -> LineLocation {
        LineLocation {
            pt: self.last_pt(),
            segment: self.pts.len() - 2,
            dist_along: self.length,
            fraction: 1.0,
            dist_away: 0.0,
        }
    }

    /// The piece of this line between two locations, walking forwards through the vertices. If
    /// `from` comes after `to`, they're swapped first; the result never wraps around past either
    /// end. Both endpoints are included, so the result may repeat a vertex when a location sits
    /// exactly on one.
    pub fn slice_between(&self, from: &LineLocation, to: &LineLocation) -> Vec<Pt2D> {
        let (start, end) = if (to.dist_along, to.segment) < (from.dist_along, from.segment) {
            (to, from)
        } else {
            (from, to)
        };
        // Zero-length segments can make the segment index disagree with dist_along
        let last_segment = end.segment.max(start.segment);

        let mut result = vec![start.pt];
        result.extend(self.pts[start.segment + 1..=last_segment].iter().cloned());
        result.push(end.pt);
        result
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "PolyLine::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}
