//! Headless tools for areas of interest: trying cuts on boundaries, inspecting and editing a saved
//! store, and replaying recorded editing sessions.

#[macro_use]
extern crate log;

mod replay;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use structopt::StructOpt;

use aoi_editor::{EditSession, Options, RecordingSurface};
use aoi_model::{AoiID, AoiRepository};
use geom::{LonLat, PolyLine, Ring};

#[derive(StructOpt)]
#[structopt(name = "aoi", about = "Tools for editing areas of interest")]
enum Command {
    /// Cuts a boundary with a line and prints the piece that's kept as GeoJSON
    Split {
        /// The path to a GeoJSON file with the boundary polygon
        #[structopt(long)]
        ring: String,
        /// The path to a GeoJSON file with the cut line
        #[structopt(long)]
        cut: String,
        /// The path to a JSON options file
        #[structopt(long)]
        options: Option<String>,
    },
    /// Prints every area in a store
    List {
        #[structopt()]
        store: String,
    },
    /// Removes one area from a store, modifying it in-place
    Remove {
        #[structopt()]
        store: String,
        #[structopt(long)]
        id: String,
    },
    /// Saves the square around a search result as a new area
    Preview {
        #[structopt()]
        store: String,
        /// The ID of the new area
        #[structopt(long)]
        id: String,
        /// The place's name, as a geocoder describes it. Only the part before the first comma is
        /// kept.
        #[structopt(long)]
        display_name: String,
        #[structopt(long)]
        lon: f64,
        #[structopt(long)]
        lat: f64,
        /// The path to a JSON options file
        #[structopt(long)]
        options: Option<String>,
    },
    /// Plays a JSON list of editing events against a store
    Replay {
        /// The store to start from. It doesn't need to exist yet.
        #[structopt()]
        store: String,
        /// The path to the JSON events
        #[structopt(long)]
        events: String,
        /// Where to write the resulting store. Defaults to overwriting the input.
        #[structopt(long)]
        output: Option<String>,
        /// The path to a JSON options file
        #[structopt(long)]
        options: Option<String>,
    },
}

fn main() -> Result<()> {
    let cmd = Command::from_args();

    // Split prints GeoJSON to STDOUT, so keep logs off unless asked for
    if !matches!(cmd, Command::Split { .. }) || std::env::var("RUST_LOG").is_ok() {
        abstutil::logger::setup();
    }

    match cmd {
        Command::Split { ring, cut, options } => split(ring, cut, options)?,
        Command::List { store } => list(store)?,
        Command::Remove { store, id } => remove(store, id)?,
        Command::Preview {
            store,
            id,
            display_name,
            lon,
            lat,
            options,
        } => preview(store, id, display_name, LonLat::new(lon, lat), options)?,
        Command::Replay {
            store,
            events,
            output,
            options,
        } => replay::run(store, events, output, options)?,
    }
    Ok(())
}

/// Reads a GeoJSON file holding a bare geometry, a feature, or a collection whose first feature
/// has a geometry.
fn read_geometry(path: &str) -> Result<geojson::Geometry> {
    let raw = fs_err::read_to_string(path)?;
    let geojson: geojson::GeoJson = raw.parse().with_context(|| format!("parsing {}", path))?;
    let geometry = match geojson {
        geojson::GeoJson::Geometry(geometry) => Some(geometry),
        geojson::GeoJson::Feature(feature) => feature.geometry,
        geojson::GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .find_map(|feature| feature.geometry),
    };
    match geometry {
        Some(geometry) => Ok(geometry),
        None => bail!("{} has no geometry", path),
    }
}

fn split(ring_path: String, cut_path: String, options: Option<String>) -> Result<()> {
    let opts = Options::load_or_default(options.as_deref())?;
    let ring = Ring::from_geojson(&read_geometry(&ring_path)?)?;
    let cut = PolyLine::from_geojson(&read_geometry(&cut_path)?)?;

    match geom::split_with(&ring, &cut, &opts.split) {
        Some(result) => {
            info!("Area went from {} to {}", ring.area(), result.area());
            println!("{}", abstutil::to_json(&result.to_geojson())?);
        }
        None => bail!("The cut doesn't trim {}", ring_path),
    }
    Ok(())
}

fn list(path: String) -> Result<()> {
    let repo = AoiRepository::load(&path)?;
    if repo.is_empty() {
        println!("{} has no areas", path);
    }
    for (idx, aoi) in repo.list().iter().enumerate() {
        println!(
            "{}: {} ({}), area {:.6}, created {}",
            idx + 1,
            repo.display_name(idx),
            aoi.id.0,
            aoi.geometry.area(),
            aoi.created_at.to_rfc3339()
        );
    }
    Ok(())
}

fn remove(path: String, id: String) -> Result<()> {
    let mut repo = AoiRepository::load(&path)?;
    let id = AoiID(id);
    match repo.remove(&id) {
        Some(aoi) => info!("Removed {} ({})", id, aoi.name),
        None => bail!("{} doesn't have {}", path, id),
    }
    repo.save(&path)
}

fn preview(
    path: String,
    id: String,
    display_name: String,
    center: LonLat,
    options: Option<String>,
) -> Result<()> {
    let mut repo = AoiRepository::load_or_empty(&path)?;
    let mut session = EditSession::new(Options::load_or_default(options.as_deref())?);
    let mut surface = RecordingSurface::new();
    session.show_search_result(&mut surface, &display_name, center)?;
    let id = session.apply_preview(&mut repo, &mut surface, AoiID(id), Utc::now())?;
    info!("Added {} to {}", id, path);
    repo.save(&path)
}
