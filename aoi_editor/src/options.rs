use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::SplitOptions;

/// Tunables for the editing session. Every field has a default, so a config file only needs to
/// mention what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// After a cut line is consumed, wait this long before asking the drawing surface for a new
    /// line, so it has finished removing the old one.
    pub rearm_delay_ms: u64,
    /// Half the side length, in degrees, of the square outlined around a search result
    pub preview_half_size: f64,
    /// How far to zoom the map when showing a search result
    pub fly_to_zoom: f64,
    pub split: SplitOptions,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            rearm_delay_ms: 50,
            preview_half_size: 0.05,
            fly_to_zoom: 13.0,
            split: SplitOptions::default(),
        }
    }
}

impl Options {
    pub fn rearm_delay(&self) -> Duration {
        Duration::from_millis(self.rearm_delay_ms)
    }

    /// Reads options from a JSON file if one is given and exists, otherwise uses the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Options> {
        let path = match path {
            Some(path) => path,
            None => return Ok(Options::default()),
        };
        match abstutil::maybe_read_json(path)? {
            Some(opts) => {
                info!("Loaded options from {}", path);
                Ok(opts)
            }
            None => {
                warn!("{} doesn't exist, using default options", path);
                Ok(Options::default())
            }
        }
    }
}
