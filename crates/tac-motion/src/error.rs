//! Motion-subsystem error type.

use thiserror::Error;

use tac_core::{Coord, UnitId};
use tac_grid::GridError;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("unit {0} has not been placed on the grid")]
    NotPlaced(UnitId),

    #[error("unit {0} is already executing a move")]
    AlreadyMoving(UnitId),

    #[error("unit {0} has no reachability map; run plan_reach first")]
    NoReachMap(UnitId),

    #[error("destination {0} is occupied and cannot be a final landing tile")]
    DestinationOccupied(Coord),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

pub type MotionResult<T> = Result<T, MotionError>;
