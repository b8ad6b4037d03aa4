//! One unit's movement state machine.
//!
//! # Driver model
//!
//! `MotionState` owns a waypoint queue and the active [`MotionPhase`].  The
//! host calls [`advance`][MotionState::advance] once per tick with the
//! current timestamp; the machine computes its own elapsed time, so ticks
//! may be any size.  Each dequeued waypoint picks its phase fresh from the
//! elevation delta and horizontal distance — phases are never carried from
//! one waypoint to the next.
//!
//! Pauses (the pre-leap crouch, the landing beat) are absolute `SimTime`
//! deadlines stored inside the phase.  A machine frozen mid-crouch and
//! resumed two ticks later behaves identically to one ticked every frame.

use std::collections::VecDeque;

use tac_core::{Coord, SimTime, TeamId, UnitId, WorldPos};
use tac_grid::{Path, TileGrid};

use crate::phase::{Facing, LeapStage, MotionPhase};

// ── Tuning constants ──────────────────────────────────────────────────────────

/// Base walking rate in tiles per second.
pub const WALK_SPEED: f32 = 2.0;

/// Base airborne travel rate; multiplied by the square root of the leap's
/// horizontal span so long leaps don't take proportionally longer.
pub const LEAP_SPEED: f32 = 3.0;

/// Anticipatory crouch held before a leap or jump begins.
pub const CROUCH_SECS: f64 = 0.25;

/// Touchdown pause before the next waypoint is taken.
pub const LAND_SECS: f64 = 0.15;

/// Peak of the visual leap arc, in height units above the straight line
/// between takeoff and landing.
pub const LEAP_ARC_HEIGHT: f32 = 1.5;

/// World-space position of the standing point on a tile.
fn standing_pos(grid: &TileGrid, coord: Coord) -> WorldPos {
    let z = grid.standing_height(coord).unwrap_or(0);
    WorldPos::new(coord.x as f32, coord.y as f32, z as f32)
}

// ── MotionState ───────────────────────────────────────────────────────────────

/// Per-unit movement state: logical tile, interpolated position, facing,
/// waypoint queue, and the active phase.
///
/// The machine exclusively owns its queue and phase.  It never mutates the
/// grid — the occupancy handoff happens once, at move start, in the engine.
#[derive(Clone, Debug)]
pub struct MotionState {
    pub unit: UnitId,
    pub team: TeamId,

    /// The last tile this unit logically completed (its current tile while
    /// idle, the segment origin while a segment is in flight).
    coord: Coord,

    /// Interpolated render-space position.
    position: WorldPos,

    facing: Facing,
    phase: MotionPhase,

    /// Remaining waypoints of the current move command, consumed
    /// front-to-back.
    queue: VecDeque<Coord>,

    // ── Current segment ───────────────────────────────────────────────────
    segment_target: Coord,
    origin_pos: WorldPos,
    target_pos: WorldPos,

    /// Walking/jumping speed multiplier: taller vertical gaps move
    /// proportionally faster so the animation duration stays constant.
    speed_scale: f32,

    /// Horizontal span of the current leap, in tiles (>= 1 while leaping).
    leap_span: f32,

    /// Fraction of the leap's horizontal span covered so far, 0..=1.
    leap_progress: f32,

    /// Timestamp of the previous `advance` call.
    last_tick: SimTime,
}

impl MotionState {
    /// Construct a stationary machine for a unit standing at `coord`.
    pub fn stationary(unit: UnitId, team: TeamId, coord: Coord, grid: &TileGrid) -> Self {
        let position = standing_pos(grid, coord);
        Self {
            unit,
            team,
            coord,
            position,
            facing: Facing::default(),
            phase: MotionPhase::Idle,
            queue: VecDeque::new(),
            segment_target: coord,
            origin_pos: position,
            target_pos: position,
            speed_scale: 1.0,
            leap_span: 1.0,
            leap_progress: 0.0,
            last_tick: SimTime::ZERO,
        }
    }

    // ── Read API ──────────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Interpolated position for the rendering layer.
    #[inline]
    pub fn position(&self) -> WorldPos {
        self.position
    }

    /// The unit's last completed tile.
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.phase.is_moving()
    }

    pub fn waypoints_remaining(&self) -> usize {
        self.queue.len()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Seed the machine with a freshly extracted path and take the first
    /// waypoint.  An empty (trivial) path is a valid no-op: the machine
    /// stays `Idle`.
    pub fn begin_path(&mut self, grid: &TileGrid, path: Path, now: SimTime) {
        if path.is_trivial() {
            return;
        }
        self.queue = path.waypoints.into();
        self.last_tick = now;
        self.take_next_waypoint(grid, now);
    }

    /// Abort the current move: the queue is dropped and the machine is
    /// forced `Idle` in place.  Occupancy already handed to the move's
    /// destination is the caller's to roll back.
    pub fn cancel(&mut self) {
        self.queue.clear();
        self.phase = MotionPhase::Idle;
    }

    /// Advance the machine to `now`.  Returns `true` exactly once per move
    /// command: on the tick its last waypoint completes.
    pub fn advance(&mut self, grid: &TileGrid, now: SimTime) -> bool {
        let dt = now.since(self.last_tick) as f32;
        self.last_tick = now;

        match self.phase {
            MotionPhase::Idle => false,

            MotionPhase::Finished => {
                self.phase = MotionPhase::Idle;
                false
            }

            MotionPhase::Walking => {
                let step = WALK_SPEED * self.speed_scale * dt;
                self.position = self.position.move_toward(self.target_pos, step);
                if self.position == self.target_pos {
                    self.arrive_at_segment_target(grid, now)
                } else {
                    false
                }
            }

            MotionPhase::Leaping(stage) => match self.drive_leap_stage(stage, dt, now, true) {
                StageOutcome::Continue(next) => {
                    self.phase = MotionPhase::Leaping(next);
                    false
                }
                StageOutcome::SegmentDone => self.arrive_at_segment_target(grid, now),
            },

            MotionPhase::JumpingUp(stage) => match self.drive_leap_stage(stage, dt, now, false) {
                StageOutcome::Continue(next) => {
                    self.phase = MotionPhase::JumpingUp(next);
                    false
                }
                StageOutcome::SegmentDone => self.arrive_at_segment_target(grid, now),
            },
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Run one tick of the crouch/airborne/landing choreography.
    /// `arc` selects the parabolic leap trajectory; the jump-up travels a
    /// straight line at walking rate instead.
    fn drive_leap_stage(
        &mut self,
        stage: LeapStage,
        dt: f32,
        now: SimTime,
        arc: bool,
    ) -> StageOutcome {
        match stage {
            LeapStage::Crouch { until } => {
                if now >= until {
                    StageOutcome::Continue(LeapStage::Airborne)
                } else {
                    StageOutcome::Continue(stage)
                }
            }

            LeapStage::Airborne => {
                let arrived = if arc {
                    // Progress fraction moves at LEAP_SPEED * sqrt(span),
                    // so doubling the span costs only ~41% more time.
                    let rate = LEAP_SPEED * self.leap_span.sqrt() / self.leap_span;
                    self.leap_progress = (self.leap_progress + rate * dt).min(1.0);
                    let t = self.leap_progress;

                    let lerp = |a: f32, b: f32| a + (b - a) * t;
                    let hop = LEAP_ARC_HEIGHT * 4.0 * t * (1.0 - t);
                    self.position = WorldPos::new(
                        lerp(self.origin_pos.x, self.target_pos.x),
                        lerp(self.origin_pos.y, self.target_pos.y),
                        lerp(self.origin_pos.z, self.target_pos.z) + hop,
                    );
                    t >= 1.0
                } else {
                    let step = WALK_SPEED * self.speed_scale * dt;
                    self.position = self.position.move_toward(self.target_pos, step);
                    self.position == self.target_pos
                };

                if arrived {
                    self.position = self.target_pos;
                    StageOutcome::Continue(LeapStage::Landing { until: now.after(LAND_SECS) })
                } else {
                    StageOutcome::Continue(LeapStage::Airborne)
                }
            }

            LeapStage::Landing { until } => {
                if now >= until {
                    StageOutcome::SegmentDone
                } else {
                    StageOutcome::Continue(stage)
                }
            }
        }
    }

    /// Commit the segment's logical arrival, then take the next waypoint.
    /// Returns `true` when that drained the queue (the move finished).
    fn arrive_at_segment_target(&mut self, grid: &TileGrid, now: SimTime) -> bool {
        self.coord = self.segment_target;
        self.take_next_waypoint(grid, now)
    }

    /// Dequeue the next waypoint and recompute the phase for it, or report
    /// the move finished when the queue is empty.
    fn take_next_waypoint(&mut self, grid: &TileGrid, now: SimTime) -> bool {
        let Some(next) = self.queue.pop_front() else {
            self.phase = MotionPhase::Finished;
            return true;
        };

        let from = self.coord;
        let dz = match (grid.standing_height(next), grid.standing_height(from)) {
            (Some(to_z), Some(from_z)) => to_z - from_z,
            // A waypoint off the grid can only come from a corrupted path;
            // degrade to a flat walk rather than panic.
            _ => 0,
        };
        let dx = (next.x - from.x).abs();
        let dy = (next.y - from.y).abs();

        self.segment_target = next;
        self.origin_pos = self.position;
        self.target_pos = standing_pos(grid, next);
        self.facing = Facing::toward(from, next);
        self.speed_scale = dz.abs().max(1) as f32;
        self.leap_span = self.origin_pos.horizontal_distance(self.target_pos).max(1.0);
        self.leap_progress = 0.0;

        self.phase = if dx > 1 || dy > 1 {
            // Horizontal leap, regardless of height.
            MotionPhase::Leaping(LeapStage::Crouch { until: now.after(CROUCH_SECS) })
        } else if dz > 1 {
            MotionPhase::JumpingUp(LeapStage::Crouch { until: now.after(CROUCH_SECS) })
        } else if dz >= -1 {
            MotionPhase::Walking
        } else {
            // Adjacent fall-down uses the leap choreography.
            MotionPhase::Leaping(LeapStage::Crouch { until: now.after(CROUCH_SECS) })
        };

        false
    }
}

/// Result of ticking one leap stage.
enum StageOutcome {
    Continue(LeapStage),
    SegmentDone,
}
