use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aoi_model::{AoiError, AoiID, AoiRepository};
use geom::LonLat;

use crate::{DrawingSurface, EditSession, Tool};

/// Something the user did, recorded so a session can be replayed without a map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    SelectTool {
        tool: Tool,
    },
    FeatureFinished {
        id: AoiID,
        geometry: geojson::Geometry,
    },
    FeatureUpdated {
        id: AoiID,
        geometry: geojson::Geometry,
    },
    FeatureDeleted {
        ids: Vec<AoiID>,
    },
    SelectionChanged {
        ids: Vec<AoiID>,
    },
    ConfirmPending {
        name: String,
    },
    CancelPending,
    SearchResult {
        display_name: String,
        center: LonLat,
    },
    ApplyPreview {
        id: AoiID,
    },
    ClearPreview,
    /// Let time pass, running any deferred work that comes due
    Wait {
        ms: u64,
    },
}

impl EditSession {
    /// Dispatches one recorded event. `created_at` stamps any area saved by this event.
    pub fn handle_event(
        &mut self,
        repo: &mut AoiRepository,
        surface: &mut dyn DrawingSurface,
        event: Event,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        match event {
            Event::SelectTool { tool } => self.select_tool(tool, surface),
            Event::FeatureFinished { id, geometry } => {
                self.on_feature_finished(repo, surface, id, &geometry)
            }
            Event::FeatureUpdated { id, geometry } => {
                self.on_feature_updated(repo, surface, id, &geometry)
            }
            Event::FeatureDeleted { ids } => self.on_feature_deleted(repo, surface, &ids),
            Event::SelectionChanged { ids } => self.on_selection_changed(repo, surface, &ids),
            Event::ConfirmPending { name } => {
                self.confirm_pending(repo, surface, &name, created_at)?;
            }
            Event::CancelPending => self.cancel_pending(surface),
            Event::SearchResult {
                display_name,
                center,
            } => self.show_search_result(surface, &display_name, center)?,
            Event::ApplyPreview { id } => {
                self.apply_preview(repo, surface, id, created_at)?;
            }
            Event::ClearPreview => self.clear_preview(surface),
            Event::Wait { ms } => {
                let now = self.now() + Duration::from_millis(ms);
                self.step_if_needed(now, surface);
            }
        }
        Ok(())
    }
}

/// Replays events in order. Events that fail are logged and skipped, like a user dismissing an
/// error dialog. Returns how many failed.
pub fn replay(
    session: &mut EditSession,
    repo: &mut AoiRepository,
    surface: &mut dyn DrawingSurface,
    events: Vec<Event>,
    created_at: DateTime<Utc>,
) -> usize {
    let mut failures = 0;
    for (idx, event) in events.into_iter().enumerate() {
        if let Err(err) = session.handle_event(repo, surface, event, created_at) {
            match err.downcast_ref::<AoiError>() {
                Some(AoiError::NothingPending) => warn!("Event {}: {}", idx, err),
                _ => error!("Event {} failed: {}", idx, err),
            }
            failures += 1;
        }
    }
    failures
}
