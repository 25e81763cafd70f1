use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

/// A point in the plane. For areas of interest, x is longitude and y is latitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }

        Pt2D { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    /// Planar Euclidean distance. This is the only distance metric in the crate.
    pub fn dist_to(self, to: Pt2D) -> f64 {
        ((self.x - to.x).powi(2) + (self.y - to.y).powi(2)).sqrt()
    }

    pub fn approx_eq(self, other: Pt2D, threshold: f64) -> bool {
        self.dist_to(other) < threshold
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x + dx, self.y + dy)
    }

    pub fn to_hashable(self) -> HashablePt2D {
        HashablePt2D::new(self.x, self.y)
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x, self.y)
    }
}

impl From<Pt2D> for geo::Coordinate<f64> {
    fn from(pt: Pt2D) -> Self {
        geo::Coordinate { x: pt.x, y: pt.y }
    }
}

impl From<Pt2D> for geo::Point<f64> {
    fn from(pt: Pt2D) -> Self {
        geo::Point::new(pt.x, pt.y)
    }
}

/// An exact, hashable version of a point. Two points that are merely close don't hash the same.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct HashablePt2D {
    x_nan: NotNan<f64>,
    y_nan: NotNan<f64>,
}

impl HashablePt2D {
    fn new(x: f64, y: f64) -> HashablePt2D {
        // Pt2D rejects NaN on construction, so these can't fail
        HashablePt2D {
            x_nan: NotNan::new(x).unwrap(),
            y_nan: NotNan::new(y).unwrap(),
        }
    }
}
