//! `tac-grid` — tile grid, reachability search, and path extraction.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`tile`]    | `Tile`, `Occupant`, `SurfaceOrientation`                     |
//! | [`grid`]    | `TileGrid` (coordinate → tile map), `TileGridBuilder`        |
//! | [`search`]  | `ReachPlanner` trait, `LeapSearch`, `MoveProfile`, `ReachMap`, `Path` |
//! | [`error`]   | `GridError`, `GridResult<T>`                                 |
//!
//! # Search model
//!
//! Reachability is a cost-bounded frontier expansion: Dijkstra specialized
//! to small integer movement costs, using cost-indexed buckets instead of a
//! priority queue.  The per-direction leap-distance loop encodes the
//! height-based visibility rules (what can be leapt over vs. landed on)
//! that a plain BFS cannot express.  See [`search::LeapSearch`].
//!
//! The search only ever *reads* the grid.  Occupancy changes go through
//! `TileGrid::place`/`vacate`/`handoff`, applied once per move command by
//! the motion layer.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod search;
pub mod tile;


pub use error::{GridError, GridResult};
pub use grid::{TileGrid, TileGridBuilder};
pub use search::{
    extract_path, is_open_landing, LeapSearch, MoveProfile, Path, ReachMap, ReachPlanner,
    OCCUPIED_CLEARANCE_BONUS,
};
pub use tile::{Occupant, SurfaceOrientation, Tile};
