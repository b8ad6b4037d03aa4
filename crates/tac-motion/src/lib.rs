//! `tac-motion` — per-unit movement state machine and move-command engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`phase`]    | `MotionPhase`, `LeapStage`, `Facing`                            |
//! | [`machine`]  | `MotionState` — one unit's waypoint queue + phase driver        |
//! | [`engine`]   | `MotionEngine<P>` — placement, reach planning, move commands    |
//! | [`error`]    | `MotionError`, `MotionResult<T>`                                |
//!
//! # Movement model
//!
//! A move command turns a chosen destination into an ordered waypoint list
//! (via the backtrace map from `tac-grid`), applies the occupancy handoff
//! once — origin decoupled, *final* destination coupled, intermediate tiles
//! never marked — and seeds the unit's [`MotionState`].  Each host tick,
//! [`MotionEngine::advance`] drives every machine one step:
//!
//! 1. Dequeue a waypoint and pick a phase from the elevation delta and
//!    horizontal distance (walk, leap, jump-up).
//! 2. Interpolate the unit's [`WorldPos`][tac_core::WorldPos] toward the
//!    waypoint; pauses inside a phase are absolute
//!    [`SimTime`][tac_core::SimTime] deadlines, so correctness never
//!    depends on the tick rate.
//! 3. On waypoint exhaustion, pass through `Finished` (observable for one
//!    tick, reported by `advance`) and settle in `Idle`.
//!
//! The machine never raises errors for a well-formed waypoint list; an
//! empty list is a valid no-op.

pub mod engine;
pub mod error;
pub mod machine;
pub mod phase;

#[cfg(test)]
mod tests;

pub use engine::MotionEngine;
pub use error::{MotionError, MotionResult};
pub use machine::{MotionState, CROUCH_SECS, LAND_SECS, LEAP_ARC_HEIGHT, LEAP_SPEED, WALK_SPEED};
pub use phase::{Facing, LeapStage, MotionPhase};
