//! Reachability search and path extraction.
//!
//! # Pluggability
//!
//! The motion layer calls planning via the [`ReachPlanner`] trait, so
//! applications can swap in custom implementations (flying units,
//! teleporters) without touching the movement machinery.  The default
//! [`LeapSearch`] covers ground units.
//!
//! # Cost model
//!
//! All movement costs are small positive integers, so the search expands
//! cost-indexed *frontier buckets* instead of maintaining a priority queue:
//! bucket `c` holds every `(candidate, predecessor)` pair discovered at
//! cumulative cost `c`, buckets are processed in ascending order, and the
//! first arrival at a coordinate is final.  That gives Dijkstra's
//! optimality with O(1) "queue" operations — and the explicit per-direction
//! leap-distance loop is where the height-based visibility rules live
//! (what can be leapt over vs. landed on), which a plain BFS cannot
//! express.

use rustc_hash::FxHashMap;

use tac_core::{Coord, Direction, TeamId};

use crate::grid::TileGrid;
use crate::tile::Tile;
use crate::{GridError, GridResult};

/// Extra clearance height an opposing occupant adds to its tile when leapt
/// over — the occupant's sprite is treated as part of the terrain.
pub const OCCUPIED_CLEARANCE_BONUS: i32 = 3;

// ── MoveProfile ───────────────────────────────────────────────────────────────

/// Per-search movement parameters for one unit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveProfile {
    /// Total movement cost points available this turn.
    pub movement_budget: u32,

    /// Max upward elevation difference a single step may climb, and the
    /// height margin available for clearing obstacles mid-leap.
    pub jump_allowance: i32,

    /// Max number of tiles that may be vacated in a straight line during a
    /// single leap.  0 degenerates to plain walking.
    pub leap_allowance: u32,

    /// The searching unit's team; decides whether occupants block or can
    /// be passed.
    pub team: TeamId,

    /// Force-ignore occupancy entirely.
    pub bypass_occupants: bool,

    /// Reject liquid tiles as landing spots (they remain leap-over-able).
    pub avoid_liquid: bool,
}

impl MoveProfile {
    pub fn new(movement_budget: u32, jump_allowance: i32, leap_allowance: u32, team: TeamId) -> Self {
        Self {
            movement_budget,
            jump_allowance,
            leap_allowance,
            team,
            bypass_occupants: false,
            avoid_liquid: false,
        }
    }
}

// ── ReachMap ──────────────────────────────────────────────────────────────────

/// The backtrace map a search produces: every reachable coordinate mapped
/// to its predecessor (the origin maps to `None`).
///
/// Invariant: the entries form a forest rooted at the origin — following
/// predecessors from any reachable coordinate terminates at the origin in
/// at most `movement_budget` steps.  A `ReachMap` is a plain value the
/// caller owns and discards; highlighting and move validation both read
/// from it without re-running the search.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachMap {
    origin: Coord,
    predecessors: FxHashMap<Coord, Option<Coord>>,
}

impl ReachMap {
    /// The tile the search started from.
    #[inline]
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// `true` if `coord` was reached (the origin always is).
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.predecessors.contains_key(&coord)
    }

    /// The predecessor of `coord`, or `None` if `coord` is the origin or
    /// was not reached.
    #[inline]
    pub fn predecessor(&self, coord: Coord) -> Option<Coord> {
        self.predecessors.get(&coord).copied().flatten()
    }

    /// Number of reachable coordinates, origin included.
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Iterate reachable coordinates in unspecified order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.predecessors.keys().copied()
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered waypoint list from the tile adjacent to the origin through to
/// the final destination (origin excluded).  Created fresh per move
/// command, consumed front-to-back by the motion machine, discarded on
/// completion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub waypoints: Vec<Coord>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// `true` when the destination was the origin itself.
    pub fn is_trivial(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The first tile to step onto.
    pub fn first(&self) -> Option<Coord> {
        self.waypoints.first().copied()
    }

    /// The final destination.
    pub fn final_destination(&self) -> Option<Coord> {
        self.waypoints.last().copied()
    }
}

// ── ReachPlanner trait ────────────────────────────────────────────────────────

/// Pluggable reachability search.
///
/// Implement this trait to replace the default ground-unit rules with — for
/// example — flight (ignore elevation entirely) or teleportation (ignore
/// intervening tiles).  Implementations must be pure: they read the grid
/// snapshot and return a complete map or an error, never a partial result.
pub trait ReachPlanner {
    /// Compute every tile reachable from `origin` under `profile`.
    ///
    /// The origin must reference an occupied, accessible tile; fails with
    /// [`GridError::InvalidOrigin`] otherwise.
    fn plan(&self, grid: &TileGrid, origin: Coord, profile: &MoveProfile) -> GridResult<ReachMap>;
}

// ── LeapSearch ────────────────────────────────────────────────────────────────

/// The standard ground-movement search: cost-bucketed frontier expansion
/// with walk, jump, and leap rules.
///
/// # Movement rules
///
/// - Steps probe the four axis directions in the fixed order +x, -x, +y,
///   -y; each direction probes landing distances `1..=leap_allowance + 1`.
/// - A step of distance `d` from a tile with movement cost `m` costs
///   `d * m` points.
/// - Landing requires the target to be present, accessible, dry (when
///   avoiding liquid), unblocked by opposing occupants, no higher than the
///   source's reach (`surface_max + jump_allowance`), and no lower than its
///   drop limit (`surface_min - jump_allowance`).  Leaps (`d > 1`) may drop
///   but never climb: the target's surface min must not exceed the
///   source's.
/// - Passing over a tile mid-leap requires clearing its top —
///   `surface_max`, plus [`OCCUPIED_CLEARANCE_BONUS`] if an opposing unit
///   stands there — with the same `surface_max + jump_allowance` reach.
///   Inaccessible and liquid tiles clear like any other; empty space
///   always clears.  A tile that cannot be cleared ends the direction.
/// - Same-team occupants never block: their tiles enter the map as
///   pass-through waypoints, and the move layer rejects them as final
///   landing spots.
pub struct LeapSearch;

impl ReachPlanner for LeapSearch {
    fn plan(&self, grid: &TileGrid, origin: Coord, profile: &MoveProfile) -> GridResult<ReachMap> {
        let origin_tile = grid.tile(origin).ok_or(GridError::InvalidOrigin(origin))?;
        if origin_tile.inaccessible || origin_tile.occupant.is_none() {
            return Err(GridError::InvalidOrigin(origin));
        }

        let budget = profile.movement_budget as usize;

        // buckets[c] = (candidate, predecessor) pairs discovered at cost c.
        // Entries are pushed in deterministic probe order; the first entry
        // finalized for a coordinate wins, so equal-cost ties always break
        // the same way.
        let mut buckets: Vec<Vec<(Coord, Coord)>> = vec![Vec::new(); budget + 1];
        buckets[0].push((origin, origin));

        let mut finalized: FxHashMap<Coord, Option<Coord>> = FxHashMap::default();

        for cost in 0..=budget {
            // Step costs are >= 1, so new candidates always land in a later
            // bucket; taking the current one is safe.
            let pending = std::mem::take(&mut buckets[cost]);
            for (coord, pred) in pending {
                if finalized.contains_key(&coord) {
                    continue; // first arrival already won
                }
                finalized.insert(coord, (coord != origin).then_some(pred));

                let Some(source) = grid.tile(coord) else {
                    continue;
                };
                for direction in Direction::ALL {
                    probe_direction(grid, profile, source, cost, direction, budget, &mut buckets);
                }
            }
        }

        Ok(ReachMap { origin, predecessors: finalized })
    }
}

/// Expand one direction from a finalized tile, pushing every legal landing
/// into its cost bucket.
fn probe_direction(
    grid: &TileGrid,
    profile: &MoveProfile,
    source: &Tile,
    cost: usize,
    direction: Direction,
    budget: usize,
    buckets: &mut [Vec<(Coord, Coord)>],
) {
    let step_cost = source.movement_cost as usize;
    let max_landing = profile.leap_allowance + 1;

    for distance in 1..=max_landing {
        let total = cost + distance as usize * step_cost;
        if total > budget {
            break; // every further distance only costs more
        }

        let target_coord = source.coord.offset(direction, distance as i32);
        let Some(target) = grid.tile(target_coord) else {
            // Empty space: never landable, always clearable.
            continue;
        };

        // Landing and pass-over are judged independently: a tile we cannot
        // stop on may still be leapt over, and vice versa.
        if can_land(source, target, distance, profile) {
            buckets[total].push((target_coord, source.coord));
        }
        if !can_clear(source, target, profile) {
            break; // too tall to leap past; nothing beyond is reachable this way
        }
    }
}

/// May the unit stop on `target`, arriving from `source` in a single step
/// of `distance` tiles?
fn can_land(source: &Tile, target: &Tile, distance: u32, profile: &MoveProfile) -> bool {
    if target.inaccessible {
        return false;
    }
    if profile.avoid_liquid && target.liquid {
        return false;
    }
    if !profile.bypass_occupants && target.occupied_by_opponent_of(profile.team) {
        return false;
    }

    // Too high to climb or jump up to.
    if target.surface_min() > source.surface_max() + profile.jump_allowance {
        return false;
    }
    // Too far down to drop.
    if target.surface_max() < source.surface_min() - profile.jump_allowance {
        return false;
    }
    // A leap may drop but never climb.
    if distance > 1 && target.surface_min() > source.surface_min() {
        return false;
    }

    true
}

/// May the unit pass over `target` mid-leap, launching from `source`?
fn can_clear(source: &Tile, target: &Tile, profile: &MoveProfile) -> bool {
    let mut top = target.surface_max();
    if !profile.bypass_occupants && target.occupied_by_opponent_of(profile.team) {
        top += OCCUPIED_CLEARANCE_BONUS;
    }
    top <= source.surface_max() + profile.jump_allowance
}

// ── Path extraction ───────────────────────────────────────────────────────────

/// Walk predecessors from `destination` back to the origin and return the
/// ordered waypoint list (origin excluded).
///
/// Idempotent: the map is not consumed and repeated calls yield identical
/// paths.
///
/// # Errors
/// [`GridError::Unreachable`] if `destination` is absent from the map.
pub fn extract_path(map: &ReachMap, destination: Coord) -> GridResult<Path> {
    if !map.contains(destination) {
        return Err(GridError::Unreachable(destination));
    }

    let mut waypoints = Vec::new();
    let mut cursor = destination;
    while cursor != map.origin() {
        waypoints.push(cursor);
        match map.predecessor(cursor) {
            Some(prev) => cursor = prev,
            // Unreachable by the forest invariant; bail rather than spin.
            None => return Err(GridError::Unreachable(destination)),
        }
    }
    waypoints.reverse();

    Ok(Path { waypoints })
}

/// `true` if `coord` is a tile a unit could settle on right now.  Move
/// validation needs this on top of [`ReachMap::contains`]: a mapped tile
/// may still hold an ally and therefore not be a legal final destination.
pub fn is_open_landing(grid: &TileGrid, coord: Coord) -> bool {
    grid.tile(coord).is_some_and(|t| !t.is_occupied())
}
