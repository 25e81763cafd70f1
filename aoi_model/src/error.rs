use thiserror::Error;

use crate::AoiID;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AoiError {
    /// Ids come from outside and must never collide. Hitting this means a caller has a bug.
    #[error("{0} already exists")]
    DuplicateId(AoiID),

    #[error("an area of interest needs a non-empty name")]
    EmptyName,

    #[error("there's no drawn or searched area waiting to be saved")]
    NothingPending,
}
