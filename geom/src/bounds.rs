use serde::{Deserialize, Serialize};

use crate::Pt2D;

/// An axis-aligned bounding box.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// An empty box; `update` it with points.
    pub fn new() -> Bounds {
        Bounds {
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
        }
    }

    pub fn from(pts: &[Pt2D]) -> Bounds {
        let mut b = Bounds::new();
        for pt in pts {
            b.update(*pt);
        }
        b
    }

    pub fn update(&mut self, pt: Pt2D) {
        self.min_x = self.min_x.min(pt.x());
        self.max_x = self.max_x.max(pt.x());
        self.min_y = self.min_y.min(pt.y());
        self.max_y = self.max_y.max(pt.y());
    }

    pub fn contains(&self, pt: Pt2D) -> bool {
        pt.x() >= self.min_x && pt.x() <= self.max_x && pt.y() >= self.min_y && pt.y() <= self.max_y
    }

    /// How far the point is from the box. Zero if it's inside. Never more than the distance to
    /// anything the box contains.
    pub fn dist_to_pt(&self, pt: Pt2D) -> f64 {
        let dx = (self.min_x - pt.x()).max(pt.x() - self.max_x).max(0.0);
        let dy = (self.min_y - pt.y()).max(pt.y() - self.max_y).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new()
    }
}
