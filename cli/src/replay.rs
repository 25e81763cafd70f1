use anyhow::Result;
use chrono::Utc;

use aoi_editor::{EditSession, Event, Options, RecordingSurface};
use aoi_model::AoiRepository;

pub fn run(
    store: String,
    events_path: String,
    output: Option<String>,
    options: Option<String>,
) -> Result<()> {
    let opts = Options::load_or_default(options.as_deref())?;
    let mut repo = AoiRepository::load_or_empty(&store)?;
    let events: Vec<Event> = abstutil::read_json(&events_path)?;
    info!("Replaying {} events against {}", events.len(), store);

    let mut session = EditSession::new(opts);
    let mut surface = RecordingSurface::new();
    let num_events = events.len();
    let failures = aoi_editor::replay(&mut session, &mut repo, &mut surface, events, Utc::now());

    // Let anything still scheduled run, as if the user waited around
    let settle = session.now() + session.options().rearm_delay();
    session.step_if_needed(settle, &mut surface);

    if let Some(pending) = session.pending() {
        warn!("{} was drawn but never named, so it's lost", pending.id);
    }
    info!(
        "{} of {} events failed. Ended in {:?} with {} areas",
        failures,
        num_events,
        session.state(),
        repo.len()
    );
    for id in &surface.deleted {
        debug!("Removed {} from the map", id);
    }

    let output = output.unwrap_or(store);
    repo.save(&output)?;
    println!("Wrote {}", output);
    Ok(())
}
