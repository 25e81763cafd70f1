//! Areas of interest and the repository that owns them.
//!
//! Everything that changes the list of areas goes through `AoiRepository`, which is an ordinary
//! value owned by whoever drives the editor. Nothing here knows about drawing or maps.

#[macro_use]
extern crate log;

mod aoi;
mod error;
mod repository;

pub use crate::aoi::{Aoi, AoiID, AoiUpdate, PendingAoi};
pub use crate::error::AoiError;
pub use crate::repository::AoiRepository;
