use anyhow::Result;

use geom::{LonLat, Ring};

/// An outline drawn around a place someone searched for. It's only shown, never saved, until the
/// user explicitly applies it.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchPreview {
    pub name: String,
    pub center: LonLat,
    pub geometry: Ring,
}

impl SearchPreview {
    pub fn new(display_name: &str, center: LonLat, half_size: f64) -> Result<SearchPreview> {
        Ok(SearchPreview {
            name: short_name(display_name),
            center,
            geometry: center.square_around(half_size)?,
        })
    }
}

/// Geocoders describe places like "Köln, Nordrhein-Westfalen, Deutschland". Just keep the first
/// part.
fn short_name(display_name: &str) -> String {
    display_name
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}
