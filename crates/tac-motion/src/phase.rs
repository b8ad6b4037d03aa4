//! Motion phases and unit facing.
//!
//! A phase is a tagged union switched over by one driver loop
//! ([`MotionState::advance`][crate::MotionState::advance]) — no polymorphic
//! state objects, no shared mutable manager.  Phases that wait carry their
//! own absolute deadline, so the machine is resumable from any tick.

use tac_core::{Coord, SimTime};

// ── LeapStage ─────────────────────────────────────────────────────────────────

/// The three beats of a leap (and of the jump-up, which borrows the same
/// skeleton): an anticipatory crouch, the travel itself, and a landing
/// pause before the next waypoint.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeapStage {
    /// Holding the crouch until the deadline passes.
    Crouch { until: SimTime },
    /// Travelling toward the waypoint.
    Airborne,
    /// Touched down; holding until the deadline, then advancing the queue.
    Landing { until: SimTime },
}

// ── MotionPhase ───────────────────────────────────────────────────────────────

/// The discrete stage of a unit's current movement.  Exactly one phase is
/// active per unit; it is recomputed every time a waypoint is dequeued,
/// never held across waypoints.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionPhase {
    /// Not moving.  The terminal condition of a move command.
    #[default]
    Idle,
    /// Stepping to an adjacent tile within walking tolerance (|Δz| <= 1).
    Walking,
    /// Horizontal leap or fall-down, in three stages.
    Leaping(LeapStage),
    /// Adjacent climb of more than one height unit.  Reported distinctly
    /// for the animation layer; the choreography reuses the leap stages.
    JumpingUp(LeapStage),
    /// Bookkeeping: the last waypoint just completed.  Observable for one
    /// tick, then collapses to `Idle`.
    Finished,
}

impl MotionPhase {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, MotionPhase::Idle)
    }

    /// `true` while a move command is still executing.
    #[inline]
    pub fn is_moving(&self) -> bool {
        !matches!(self, MotionPhase::Idle | MotionPhase::Finished)
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// Direction a unit faces from the camera's perspective: front is toward
/// the camera, back is away; left and right are the camera's.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    #[default]
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl Facing {
    /// The facing a unit at `origin` assumes when heading to `destination`.
    ///
    /// Exact diagonals prefer the camera-front facings, matching the
    /// original decision table.
    pub fn toward(origin: Coord, destination: Coord) -> Facing {
        let dx = destination.x - origin.x;
        let dy = destination.y - origin.y;

        if dx < 0 && dx.abs() >= dy.abs() {
            Facing::FrontLeft
        } else if dy < 0 && dx.abs() <= dy.abs() {
            Facing::FrontRight
        } else if dy > 0 && dx.abs() <= dy.abs() {
            Facing::BackLeft
        } else {
            Facing::BackRight
        }
    }
}
