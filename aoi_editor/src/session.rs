use std::time::Duration;

use chrono::{DateTime, Utc};

use aoi_model::{Aoi, AoiError, AoiID, AoiRepository, AoiUpdate, PendingAoi};
use geom::{LonLat, PolyLine, Ring};

use crate::{
    Command, DrawMode, DrawingSurface, Options, Scheduler, SearchPreview, Tool, ToolState,
};

/// Interprets what happens on the drawing surface according to the active tool.
///
/// The session doesn't own the repository or the surface; every handler borrows them. It does own
/// the state that only matters while editing: the active tool, an unnamed polygon waiting for a
/// name, a search preview, and deferred work.
pub struct EditSession {
    state: ToolState,
    pending: Option<PendingAoi>,
    preview: Option<SearchPreview>,
    scheduler: Scheduler,
    // The latest time passed to step_if_needed
    now: Duration,
    opts: Options,
}

impl EditSession {
    pub fn new(opts: Options) -> EditSession {
        EditSession {
            state: ToolState::Idle,
            pending: None,
            preview: None,
            scheduler: Scheduler::new(),
            now: Duration::ZERO,
            opts,
        }
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.state.draw_mode()
    }

    pub fn pending(&self) -> Option<&PendingAoi> {
        self.pending.as_ref()
    }

    pub fn preview(&self) -> Option<&SearchPreview> {
        self.preview.as_ref()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// True if some deferred work hasn't run yet.
    pub fn has_scheduled_work(&self) -> bool {
        !self.scheduler.is_empty()
    }

    pub fn select_tool(&mut self, tool: Tool, surface: &mut dyn DrawingSurface) {
        let state = ToolState::for_tool(tool);
        if state != self.state {
            info!("Switching from {:?} to {:?}", self.state, state);
        }
        self.state = state;
        surface.set_mode(state.draw_mode());
    }

    /// The user finished drawing something: a polygon in draw mode, a cut line while editing.
    pub fn on_feature_finished(
        &mut self,
        repo: &mut AoiRepository,
        surface: &mut dyn DrawingSurface,
        id: AoiID,
        geometry: &geojson::Geometry,
    ) {
        match self.state {
            ToolState::DrawingNewPolygon => {
                let ring = match Ring::from_geojson(geometry) {
                    Ok(ring) => ring,
                    Err(err) => {
                        warn!("Ignoring finished {}: {}", id, err);
                        return;
                    }
                };
                if let Some(old) = self.pending.take() {
                    warn!("{} replaces the unnamed {}", id, old.id);
                    surface.delete_features(&[old.id]);
                }
                info!("{} drawn, waiting for a name", id);
                self.pending = Some(PendingAoi { id, geometry: ring });
                self.state = ToolState::EditingCut;
                surface.set_mode(self.state.draw_mode());
            }
            ToolState::EditingCut => self.apply_cut(repo, surface, id, geometry),
            ToolState::Idle | ToolState::Erasing => {
                debug!("Ignoring finished {} in {:?}", id, self.state);
            }
        }
    }

    fn apply_cut(
        &mut self,
        repo: &mut AoiRepository,
        surface: &mut dyn DrawingSurface,
        line_id: AoiID,
        geometry: &geojson::Geometry,
    ) {
        let cut = match PolyLine::from_geojson(geometry) {
            Ok(cut) => cut,
            Err(err) => {
                warn!("Ignoring cut {}: {}", line_id, err);
                return;
            }
        };

        // The shape just drawn gets first pick, then saved areas in order. Only one is trimmed.
        let mut trimmed_pending = false;
        if let Some(pending) = self.pending.as_mut() {
            if let Some(ring) = geom::split_with(&pending.geometry, &cut, &self.opts.split) {
                info!("Cut {} trimmed the unnamed {}", line_id, pending.id);
                pending.geometry = ring;
                surface.sync_pending(pending);
                trimmed_pending = true;
            }
        }
        if !trimmed_pending {
            let trimmed = repo.list().iter().find_map(|aoi| {
                geom::split_with(&aoi.geometry, &cut, &self.opts.split)
                    .map(|ring| (aoi.id.clone(), ring))
            });
            match trimmed {
                Some((id, ring)) => {
                    info!("Cut {} trimmed {}", line_id, id);
                    repo.update(&id, AoiUpdate::geometry(ring));
                    surface.sync_aois(repo.list());
                }
                None => {
                    debug!("Cut {} doesn't cross any area", line_id);
                }
            }
        }

        // The line is consumed either way
        surface.delete_features(&[line_id]);
        self.scheduler
            .push(self.now + self.opts.rearm_delay(), Command::RearmCutMode);
    }

    /// The user dragged vertices of an existing feature.
    pub fn on_feature_updated(
        &mut self,
        repo: &mut AoiRepository,
        surface: &mut dyn DrawingSurface,
        id: AoiID,
        geometry: &geojson::Geometry,
    ) {
        if !self.is_pending(&id) && !repo.contains(&id) {
            debug!("Ignoring update to unknown {}", id);
            return;
        }
        let ring = match Ring::from_geojson(geometry) {
            Ok(ring) => ring,
            Err(err) => {
                warn!("Ignoring update to {}: {}", id, err);
                return;
            }
        };

        if let Some(pending) = self.pending.as_mut().filter(|p| p.id == id) {
            pending.geometry = ring;
            return;
        }
        repo.update(&id, AoiUpdate::geometry(ring));
        surface.sync_aois(repo.list());
    }

    /// Features were deleted using the surface's own controls.
    pub fn on_feature_deleted(
        &mut self,
        repo: &mut AoiRepository,
        surface: &mut dyn DrawingSurface,
        ids: &[AoiID],
    ) {
        let mut changed = false;
        for id in ids {
            if self.is_pending(id) {
                info!("Unnamed {} deleted", id);
                self.pending = None;
            }
            if repo.remove(id).is_some() {
                changed = true;
            }
        }
        if changed {
            surface.sync_aois(repo.list());
        }
    }

    pub fn on_selection_changed(
        &mut self,
        repo: &mut AoiRepository,
        surface: &mut dyn DrawingSurface,
        ids: &[AoiID],
    ) {
        match self.state {
            ToolState::Erasing => {
                if ids.is_empty() {
                    return;
                }
                for id in ids {
                    if self.is_pending(id) {
                        info!("Erased the unnamed {}", id);
                        self.pending = None;
                    }
                    if repo.remove(id).is_some() {
                        info!("Erased {}", id);
                    }
                }
                surface.delete_features(ids);
                surface.sync_aois(repo.list());
            }
            ToolState::Idle => match ids {
                [id] if repo.contains(id) => repo.select(Some(id.clone())),
                [] => repo.select(None),
                _ => {}
            },
            ToolState::DrawingNewPolygon | ToolState::EditingCut => {}
        }
    }

    fn is_pending(&self, id: &AoiID) -> bool {
        self.pending.as_ref().map(|p| &p.id == id).unwrap_or(false)
    }

    /// Runs any deferred work due by `now`. The host calls this from its event loop.
    pub fn step_if_needed(&mut self, now: Duration, surface: &mut dyn DrawingSurface) {
        self.now = self.now.max(now);
        while let Some(cmd) = self.scheduler.get_next(self.now) {
            match cmd {
                Command::RearmCutMode => {
                    // The user might have switched tools since the cut
                    if self.state == ToolState::EditingCut {
                        surface.set_mode(DrawMode::NewLine);
                    } else {
                        debug!("Not re-arming cut mode in {:?}", self.state);
                    }
                }
            }
        }
    }

    /// Names the pending polygon and adds it to the repository. On any error, the polygon stays
    /// pending.
    pub fn confirm_pending(
        &mut self,
        repo: &mut AoiRepository,
        surface: &mut dyn DrawingSurface,
        name: &str,
        created_at: DateTime<Utc>,
    ) -> Result<AoiID, AoiError> {
        let pending = self.pending.as_ref().ok_or(AoiError::NothingPending)?;
        let aoi = pending.clone().into_aoi(name, created_at)?;
        let id = aoi.id.clone();
        repo.add(aoi)?;
        self.pending = None;
        info!("Saved {} as {}", id, name.trim());
        surface.sync_aois(repo.list());
        Ok(id)
    }

    /// Throws away the pending polygon, if there is one.
    pub fn cancel_pending(&mut self, surface: &mut dyn DrawingSurface) {
        if let Some(pending) = self.pending.take() {
            info!("Discarding unnamed {}", pending.id);
            surface.delete_features(&[pending.id]);
        }
    }

    /// Outlines a geocoded place and moves the map there. Nothing is saved until `apply_preview`.
    pub fn show_search_result(
        &mut self,
        surface: &mut dyn DrawingSurface,
        display_name: &str,
        center: LonLat,
    ) -> anyhow::Result<()> {
        let preview = SearchPreview::new(display_name, center, self.opts.preview_half_size)?;
        surface.show_preview(Some(&preview.geometry));
        surface.fly_to(center, self.opts.fly_to_zoom);
        self.preview = Some(preview);
        Ok(())
    }

    /// Saves the current search preview as a new area. On any error, the preview stays.
    pub fn apply_preview(
        &mut self,
        repo: &mut AoiRepository,
        surface: &mut dyn DrawingSurface,
        id: AoiID,
        created_at: DateTime<Utc>,
    ) -> Result<AoiID, AoiError> {
        let preview = self.preview.as_ref().ok_or(AoiError::NothingPending)?;
        let aoi = Aoi::new(id.clone(), &preview.name, preview.geometry.clone(), created_at)?;
        repo.add(aoi)?;
        info!("Saved search result {} as {}", preview.name, id);
        self.clear_preview(surface);
        surface.sync_aois(repo.list());
        Ok(id)
    }

    pub fn clear_preview(&mut self, surface: &mut dyn DrawingSurface) {
        if self.preview.take().is_some() {
            surface.show_preview(None);
        }
    }
}
