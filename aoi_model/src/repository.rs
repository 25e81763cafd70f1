use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{Aoi, AoiError, AoiID, AoiUpdate};

/// The authoritative, ordered list of areas of interest. Ids are unique. Order is insertion
/// order; nothing is ever sorted implicitly.
///
/// No geometry validation happens here. Callers supply well-formed rings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AoiRepository {
    aois: Vec<Aoi>,
    // Only a lookup key; the area it names may be gone by the time someone looks
    selected: Option<AoiID>,
}

/// The only thing that survives a restart: the list of areas. Selection is transient.
#[derive(Serialize, Deserialize)]
struct Persisted {
    aois: Vec<Aoi>,
}

impl AoiRepository {
    pub fn new() -> AoiRepository {
        AoiRepository::default()
    }

    /// Appends a new area. Fails without changing anything if the id is already used.
    pub fn add(&mut self, aoi: Aoi) -> Result<(), AoiError> {
        if self.contains(&aoi.id) {
            return Err(AoiError::DuplicateId(aoi.id));
        }
        info!("Adding {} ({})", aoi.id, aoi.name);
        self.aois.push(aoi);
        Ok(())
    }

    /// Changes an existing area in place. Returns false and does nothing if it doesn't exist.
    pub fn update(&mut self, id: &AoiID, update: AoiUpdate) -> bool {
        if let Some(aoi) = self.aois.iter_mut().find(|aoi| &aoi.id == id) {
            update.apply(aoi);
            true
        } else {
            false
        }
    }

    /// Removes an area, clearing the selection if it pointed there.
    pub fn remove(&mut self, id: &AoiID) -> Option<Aoi> {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        let idx = self.aois.iter().position(|aoi| &aoi.id == id)?;
        info!("Removing {}", id);
        Some(self.aois.remove(idx))
    }

    pub fn select(&mut self, id: Option<AoiID>) {
        self.selected = id;
    }

    pub fn selected_id(&self) -> Option<&AoiID> {
        self.selected.as_ref()
    }

    /// The selected area, if there is one and it still exists.
    pub fn selected(&self) -> Option<&Aoi> {
        self.get(self.selected.as_ref()?)
    }

    pub fn list(&self) -> &[Aoi] {
        &self.aois
    }

    pub fn get(&self, id: &AoiID) -> Option<&Aoi> {
        self.aois.iter().find(|aoi| &aoi.id == id)
    }

    pub fn contains(&self, id: &AoiID) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.aois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aois.is_empty()
    }

    /// What to call an area in a list. Areas always have names once saved, but files edited by
    /// hand might not; those fall back to their position.
    pub fn display_name(&self, idx: usize) -> String {
        match self.aois.get(idx) {
            Some(aoi) if !aoi.name.trim().is_empty() => aoi.name.clone(),
            _ => format!("Area {}", idx + 1),
        }
    }

    pub fn save(&self, path: &str) -> Result<()> {
        abstutil::write_json(
            path,
            &Persisted {
                aois: self.aois.clone(),
            },
        )?;
        info!("Saved {} areas to {}", self.aois.len(), path);
        Ok(())
    }

    pub fn load(path: &str) -> Result<AoiRepository> {
        let persisted: Persisted = abstutil::read_json(path)?;
        AoiRepository::from_aois(persisted.aois).with_context(|| format!("loading {}", path))
    }

    /// Like `load`, but starts empty if the file doesn't exist yet.
    pub fn load_or_empty(path: &str) -> Result<AoiRepository> {
        match abstutil::maybe_read_json::<Persisted>(path)? {
            Some(persisted) => AoiRepository::from_aois(persisted.aois)
                .with_context(|| format!("loading {}", path)),
            None => {
                info!("{} doesn't exist yet, starting with no areas", path);
                Ok(AoiRepository::new())
            }
        }
    }

    fn from_aois(aois: Vec<Aoi>) -> Result<AoiRepository> {
        let mut repo = AoiRepository::new();
        for aoi in aois {
            repo.add(aoi)?;
        }
        Ok(repo)
    }
}
