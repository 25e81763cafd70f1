//! The editing session for areas of interest: which tool is active, what the drawing surface
//! should be doing, and how drawn, edited, and erased features turn into changes to an
//! `AoiRepository`.
//!
//! The map and its drawing controls live elsewhere. They talk to this crate through
//! `DrawingSurface` (what the core wants the map to do) and the `EditSession::on_*` handlers
//! (what the user did on the map).

#[macro_use]
extern crate log;

mod events;
mod options;
mod scheduler;
mod search;
mod session;
mod surface;
mod tools;

pub use crate::events::{replay, Event};
pub use crate::options::Options;
pub use crate::scheduler::{Command, Scheduler};
pub use crate::search::SearchPreview;
pub use crate::session::EditSession;
pub use crate::surface::{DrawingSurface, RecordingSurface};
pub use crate::tools::{DrawMode, Tool, ToolState};
