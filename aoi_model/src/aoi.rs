use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use geom::{deserialize_ring_from_geojson, serialize_ring_as_geojson, Ring};

use crate::AoiError;

/// A stable identifier, assigned by whatever drew or created the area.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AoiID(pub String);

impl fmt::Display for AoiID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AOI #{}", self.0)
    }
}

impl From<&str> for AoiID {
    fn from(id: &str) -> Self {
        AoiID(id.to_string())
    }
}

/// A named area of interest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aoi {
    pub id: AoiID,
    pub name: String,
    #[serde(
        serialize_with = "serialize_ring_as_geojson",
        deserialize_with = "deserialize_ring_from_geojson"
    )]
    pub geometry: Ring,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Aoi {
    /// The name is trimmed and must not be empty.
    pub fn new(
        id: AoiID,
        name: &str,
        geometry: Ring,
        created_at: DateTime<Utc>,
    ) -> Result<Aoi, AoiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AoiError::EmptyName);
        }
        Ok(Aoi {
            id,
            name: name.to_string(),
            geometry,
            created_at,
        })
    }
}

/// A freshly drawn area that hasn't been named yet. It lives outside the repository until it's
/// confirmed.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingAoi {
    pub id: AoiID,
    pub geometry: Ring,
}

impl PendingAoi {
    pub fn into_aoi(self, name: &str, created_at: DateTime<Utc>) -> Result<Aoi, AoiError> {
        Aoi::new(self.id, name, self.geometry, created_at)
    }
}

/// A partial change to an existing area. Anything not set stays the same. Built only through
/// the constructors, so a name change is always trimmed and non-empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AoiUpdate {
    name: Option<String>,
    geometry: Option<Ring>,
}

impl AoiUpdate {
    pub fn geometry(geometry: Ring) -> AoiUpdate {
        AoiUpdate {
            name: None,
            geometry: Some(geometry),
        }
    }

    pub fn name(name: &str) -> Result<AoiUpdate, AoiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AoiError::EmptyName);
        }
        Ok(AoiUpdate {
            name: Some(name.to_string()),
            geometry: None,
        })
    }

    pub(crate) fn apply(self, aoi: &mut Aoi) {
        if let Some(name) = self.name {
            aoi.name = name;
        }
        if let Some(geometry) = self.geometry {
            aoi.geometry = geometry;
        }
    }
}
