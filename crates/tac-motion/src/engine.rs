//! High-level motion engine: reach planning, move commands, and per-tick
//! advancement for every unit on a grid.

use rustc_hash::FxHashMap;

use tac_core::{Coord, SimTime, TeamId, UnitId};
use tac_grid::{extract_path, is_open_landing, MoveProfile, Path, ReachMap, ReachPlanner, TileGrid};

use crate::machine::MotionState;
use crate::phase::{Facing, MotionPhase};
use crate::{MotionError, MotionResult};

/// Wraps a [`ReachPlanner`] and the per-unit [`MotionState`]s to provide
/// the move-command API.
///
/// # Type parameter
///
/// `P` must implement [`ReachPlanner`] (e.g. [`tac_grid::LeapSearch`]).
/// Swap it at compile time for a different movement ruleset with no
/// runtime overhead.
///
/// # Occupancy protocol
///
/// The engine is the only component that mutates grid occupancy, and only
/// at two points: [`place`][Self::place] (initial placement) and
/// [`start_move`][Self::start_move] (the atomic origin → final-destination
/// handoff).  Intermediate waypoints are never marked occupied, and the
/// machines themselves never touch the grid.  Mutations must therefore be
/// serialized relative to any concurrent search over the same grid —
/// trivially satisfied by the single-threaded tick loop this engine is
/// built for.
pub struct MotionEngine<P: ReachPlanner> {
    /// The reachability ruleset.
    pub planner: P,

    /// Per-unit machines, present for every placed unit.
    states: FxHashMap<UnitId, MotionState>,

    /// Sparse cache: the last computed reach map per unit.  Consumed by
    /// `start_move`, so a fresh plan is required per move command.
    reach: FxHashMap<UnitId, ReachMap>,
}

impl<P: ReachPlanner> MotionEngine<P> {
    pub fn new(planner: P) -> Self {
        Self {
            planner,
            states: FxHashMap::default(),
            reach: FxHashMap::default(),
        }
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Couple `unit` to the tile at `coord` and create its machine.
    ///
    /// # Errors
    /// Grid errors for a missing or occupied tile.
    pub fn place(
        &mut self,
        grid: &mut TileGrid,
        unit: UnitId,
        team: TeamId,
        coord: Coord,
    ) -> MotionResult<()> {
        grid.place(unit, team, coord)?;
        self.states
            .insert(unit, MotionState::stationary(unit, team, coord, grid));
        Ok(())
    }

    // ── Reach planning ────────────────────────────────────────────────────

    /// Run the planner from `unit`'s current tile and cache the result.
    ///
    /// The returned map is what the UI highlights from and what
    /// [`start_move`][Self::start_move] validates against.
    pub fn plan_reach(
        &mut self,
        grid: &TileGrid,
        unit: UnitId,
        profile: &MoveProfile,
    ) -> MotionResult<&ReachMap> {
        let state = self.states.get(&unit).ok_or(MotionError::NotPlaced(unit))?;
        if state.is_moving() {
            return Err(MotionError::AlreadyMoving(unit));
        }

        let map = self.planner.plan(grid, state.coord(), profile)?;
        self.reach.remove(&unit);
        Ok(self.reach.entry(unit).or_insert(map))
    }

    /// The last map computed for `unit`, if it hasn't been consumed by a
    /// move yet.
    pub fn reach_map(&self, unit: UnitId) -> Option<&ReachMap> {
        self.reach.get(&unit)
    }

    // ── Move commands ─────────────────────────────────────────────────────

    /// Execute a move command: validate `destination` against the cached
    /// reach map and the landing-tile occupancy rule, apply the occupancy
    /// handoff, and seed the unit's machine with the extracted path.
    ///
    /// Returns the path so the caller can render the travel route.  A
    /// destination equal to the unit's own tile is a valid no-op (the
    /// machine stays `Idle` and occupancy is untouched).
    ///
    /// The cached reach map is consumed either way — occupancy has
    /// (potentially) changed, so older maps are stale.
    pub fn start_move(
        &mut self,
        grid: &mut TileGrid,
        unit: UnitId,
        destination: Coord,
        now: SimTime,
    ) -> MotionResult<Path> {
        let origin = {
            let state = self.states.get(&unit).ok_or(MotionError::NotPlaced(unit))?;
            if state.is_moving() {
                return Err(MotionError::AlreadyMoving(unit));
            }
            state.coord()
        };

        let map = self.reach.get(&unit).ok_or(MotionError::NoReachMap(unit))?;
        let path = extract_path(map, destination)?;

        if path.is_trivial() {
            self.reach.remove(&unit);
            return Ok(path);
        }

        // The map includes ally-occupied pass-through tiles; they are not
        // legal final landing spots.
        if !is_open_landing(grid, destination) {
            return Err(MotionError::DestinationOccupied(destination));
        }

        grid.handoff(origin, destination)?;
        self.reach.remove(&unit);

        if let Some(state) = self.states.get_mut(&unit) {
            state.begin_path(grid, path.clone(), now);
        }
        Ok(path)
    }

    /// Abort `unit`'s move in place.  Occupancy already handed to the
    /// move's destination is *not* reverted — rolling it back (or not) is
    /// the caller's policy.
    pub fn cancel(&mut self, unit: UnitId) -> MotionResult<()> {
        let state = self.states.get_mut(&unit).ok_or(MotionError::NotPlaced(unit))?;
        state.cancel();
        Ok(())
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every unit's machine to `now`.
    ///
    /// Returns the units whose move commands completed this tick, in
    /// ascending `UnitId` order for determinism.
    pub fn advance(&mut self, grid: &TileGrid, now: SimTime) -> Vec<UnitId> {
        let mut ids: Vec<UnitId> = self.states.keys().copied().collect();
        ids.sort_unstable();

        let mut finished = Vec::new();
        for id in ids {
            if let Some(state) = self.states.get_mut(&id) {
                if state.advance(grid, now) {
                    finished.push(id);
                }
            }
        }
        finished
    }

    // ── Read API ──────────────────────────────────────────────────────────

    pub fn state(&self, unit: UnitId) -> Option<&MotionState> {
        self.states.get(&unit)
    }

    /// Everything the rendering layer needs for one unit: interpolated
    /// position, active phase, and facing.
    pub fn visual(&self, unit: UnitId) -> Option<(tac_core::WorldPos, MotionPhase, Facing)> {
        self.states
            .get(&unit)
            .map(|s| (s.position(), s.phase(), s.facing()))
    }
}
