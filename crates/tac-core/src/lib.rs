//! `tac-core` — foundational types for the `rust_tactics` movement core.
//!
//! This crate is a dependency of every other `tac-*` crate.  It intentionally
//! has no `tac-*` dependencies and minimal external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `UnitId`, `TeamId`                                    |
//! | [`coord`]   | `Coord`, `Direction`, `WorldPos`                      |
//! | [`time`]    | `SimTime`                                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod coord;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::{Coord, Direction, WorldPos};
pub use ids::{TeamId, UnitId};
pub use time::SimTime;
