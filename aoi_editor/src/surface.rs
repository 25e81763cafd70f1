use aoi_model::{Aoi, AoiID, PendingAoi};
use geom::{LonLat, Ring};

use crate::DrawMode;

/// The map and its drawing controls, as seen from the editing session. Implementations render
/// things and forward user input back through `EditSession`'s handlers.
pub trait DrawingSurface {
    fn set_mode(&mut self, mode: DrawMode);
    /// Remove features from the surface. IDs that aren't shown are ignored.
    fn delete_features(&mut self, ids: &[AoiID]);
    /// Called after every change to the repository, with the full current list.
    fn sync_aois(&mut self, aois: &[Aoi]);
    /// Redraw the unnamed polygon after its geometry changed.
    fn sync_pending(&mut self, pending: &PendingAoi);
    /// Outline a search result, or clear the outline with `None`.
    fn show_preview(&mut self, preview: Option<&Ring>);
    fn fly_to(&mut self, center: LonLat, zoom: f64);
}

/// A surface that just remembers what it was told. Useful for headless replays and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub mode: Option<DrawMode>,
    /// Every mode change, in order
    pub mode_history: Vec<DrawMode>,
    /// Every feature ever deleted, in order
    pub deleted: Vec<AoiID>,
    /// The IDs from the most recent sync
    pub shown: Vec<AoiID>,
    pub num_syncs: usize,
    /// The unnamed polygon, as of the last time it was redrawn
    pub pending: Option<PendingAoi>,
    pub preview: Option<Ring>,
    pub camera: Option<(LonLat, f64)>,
}

impl RecordingSurface {
    pub fn new() -> RecordingSurface {
        RecordingSurface::default()
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_mode(&mut self, mode: DrawMode) {
        debug!("Drawing mode is now {:?}", mode);
        self.mode = Some(mode);
        self.mode_history.push(mode);
    }

    fn delete_features(&mut self, ids: &[AoiID]) {
        self.deleted.extend(ids.iter().cloned());
    }

    fn sync_aois(&mut self, aois: &[Aoi]) {
        self.shown = aois.iter().map(|aoi| aoi.id.clone()).collect();
        self.num_syncs += 1;
    }

    fn sync_pending(&mut self, pending: &PendingAoi) {
        self.pending = Some(pending.clone());
    }

    fn show_preview(&mut self, preview: Option<&Ring>) {
        self.preview = preview.cloned();
    }

    fn fly_to(&mut self, center: LonLat, zoom: f64) {
        debug!("Flying to {} at zoom {}", center, zoom);
        self.camera = Some((center, zoom));
    }
}
