use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{Pt2D, Ring};

/// A resolved place, as a search result delivers it. Longitude is x, latitude is y.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// An axis-aligned square centered here, extending `half_size` degrees in each direction.
    /// Wound counter-clockwise, starting from the south-west corner.
    pub fn square_around(self, half_size: f64) -> Result<Ring> {
        let (lon, lat) = (self.longitude, self.latitude);
        if !lon.is_finite() || !lat.is_finite() {
            bail!("Can't outline a square around {}", self);
        }
        if !half_size.is_finite() || half_size <= 0.0 {
            bail!("Bad half-size {} for a square around {}", half_size, self);
        }
        let (x1, x2) = (lon - half_size, lon + half_size);
        let (y1, y2) = (lat - half_size, lat + half_size);
        if ![x1, x2, y1, y2].iter().all(|c| c.is_finite()) {
            bail!("A square of half-size {} around {} overflows", half_size, self);
        }
        Ring::new(vec![
            Pt2D::new(x1, y1),
            Pt2D::new(x2, y1),
            Pt2D::new(x2, y2),
            Pt2D::new(x1, y2),
            Pt2D::new(x1, y1),
        ])
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}
