//! Grid-subsystem error type.

use thiserror::Error;

use tac_core::Coord;

/// Errors produced by `tac-grid`.
///
/// The first three variants are construction-time failures — a malformed
/// grid is rejected by [`TileGridBuilder::build`][crate::TileGridBuilder]
/// and can never surface mid-search.  `InvalidOrigin` is fatal to the
/// search call that raised it; `Unreachable` is the recoverable
/// "no valid move" answer.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("tile already registered at {0}")]
    DuplicateTile(Coord),

    #[error("tile at {coord} has surface min {min} above surface max {max}")]
    InvertedSurface { coord: Coord, min: i32, max: i32 },

    #[error("tile at {0} has movement cost 0 (must be >= 1)")]
    ZeroMovementCost(Coord),

    #[error("search origin {0} is missing, inaccessible, or unoccupied")]
    InvalidOrigin(Coord),

    #[error("destination {0} is not in the reachable set")]
    Unreachable(Coord),

    #[error("no tile at {0}")]
    TileNotFound(Coord),

    #[error("tile at {0} is already occupied")]
    TileOccupied(Coord),

    #[error("tile at {0} has no occupant")]
    TileVacant(Coord),
}

pub type GridResult<T> = Result<T, GridError>;
