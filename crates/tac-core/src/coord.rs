//! Grid coordinates, axis directions, and interpolated world positions.
//!
//! `Coord` is the integer key of a grid cell.  `WorldPos` is the continuous
//! render-space position a unit occupies while animating between cells; the
//! motion machine interpolates it, the rendering layer consumes it.

use std::fmt;
use std::ops::{Add, Sub};

// ── Coord ─────────────────────────────────────────────────────────────────────

/// Integer (x, y) grid coordinate — the unique key of one tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate `distance` cells away along `direction`.
    #[inline]
    pub fn offset(self, direction: Direction, distance: i32) -> Coord {
        let (dx, dy) = direction.delta();
        Coord::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// Manhattan (4-connected walking) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `other` shares an edge with this cell.
    #[inline]
    pub fn adjacent_to(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl Add for Coord {
    type Output = Coord;
    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;
    #[inline]
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// The four axis directions, in the fixed probe order the reachability
/// search uses.  Keeping the order fixed makes equal-cost tie-breaking
/// deterministic across runs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// +x
    East,
    /// -x
    West,
    /// +y
    North,
    /// -y
    South,
}

impl Direction {
    /// All directions in probe order: +x, -x, +y, -y.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// Unit step for this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
        }
    }
}

// ── WorldPos ──────────────────────────────────────────────────────────────────

/// Continuous render-space position: `x`/`y` follow grid coordinates, `z` is
/// elevation in game height units.  `f32` is plenty for on-screen placement.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to `other`.
    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance to `other` ignoring elevation.
    pub fn horizontal_distance(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Step from `self` toward `target` by at most `max_delta`, landing
    /// exactly on `target` once within range.  The exact-arrival clamp is
    /// what lets the motion machine compare positions with `==` to detect
    /// segment completion.
    pub fn move_toward(self, target: WorldPos, max_delta: f32) -> WorldPos {
        let dist = self.distance(target);
        if dist <= max_delta || dist == 0.0 {
            return target;
        }
        let t = max_delta / dist;
        WorldPos::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
            self.z + (target.z - self.z) * t,
        )
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
