//! Small utilities shared by the rest of the workspace: logging setup and JSON file I/O.

mod io;
pub mod logger;

pub use crate::io::{maybe_read_json, read_json, to_json, write_json};
