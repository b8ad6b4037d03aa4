//! The tile descriptor: immutable per-turn facts about one grid cell.

use tac_core::{Coord, TeamId, UnitId};

// ── SurfaceOrientation ────────────────────────────────────────────────────────

/// Direction of a tile surface's incline, if any.
///
/// Carried for the rendering layer (sprite selection, standing offset);
/// movement rules only consult the min/max surface heights.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceOrientation {
    #[default]
    Flat,
    InclinedDownToLeft,
    InclinedDownToRight,
}

// ── Occupant ──────────────────────────────────────────────────────────────────

/// A unit standing on a tile, with its team for blocking decisions.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub unit: UnitId,
    pub team: TeamId,
}

// ── Tile ──────────────────────────────────────────────────────────────────────

/// One addressable grid cell with an elevation profile and occupancy state.
///
/// Elevation splits into a reference height (`elevation`) plus highest and
/// lowest standable offsets.  Flat tiles have equal offsets; inclined tiles
/// differ by the incline's rise.  Invariant (enforced at grid build time):
/// `surface_min_offset <= surface_max_offset`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    /// Grid-unique coordinate.
    pub coord: Coord,

    /// The cell's reference height in game units.
    pub elevation: i32,

    /// Offset from `elevation` to the surface's highest standable point.
    pub surface_max_offset: i32,

    /// Offset from `elevation` to the surface's lowest standable point.
    pub surface_min_offset: i32,

    /// Incline direction, if any.
    pub surface: SurfaceOrientation,

    /// Cost to enter this tile from an adjacent one via normal movement.
    /// Always >= 1.
    pub movement_cost: u32,

    /// Can never be landed on (may still be leapt over).
    pub inaccessible: bool,

    /// Counts as water/lava; avoidable on request.
    pub liquid: bool,

    /// The unit currently standing here, if any.  At most one per tile.
    pub occupant: Option<Occupant>,
}

impl Tile {
    /// A flat, accessible, dry, vacant tile — the common case; adjust
    /// fields from here.
    pub fn flat(coord: Coord, elevation: i32) -> Self {
        Self {
            coord,
            elevation,
            surface_max_offset: 0,
            surface_min_offset: 0,
            surface: SurfaceOrientation::Flat,
            movement_cost: 1,
            inaccessible: false,
            liquid: false,
            occupant: None,
        }
    }

    /// Absolute height of the surface's highest standable point.
    #[inline]
    pub fn surface_max(&self) -> i32 {
        self.elevation + self.surface_max_offset
    }

    /// Absolute height of the surface's lowest standable point.
    #[inline]
    pub fn surface_min(&self) -> i32 {
        self.elevation + self.surface_min_offset
    }

    /// The height a unit occupies this tile at.
    #[inline]
    pub fn standing_height(&self) -> i32 {
        self.surface_max()
    }

    #[inline]
    pub fn is_inclined(&self) -> bool {
        self.surface != SurfaceOrientation::Flat
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// `true` if the occupant (if any) opposes `team`.
    #[inline]
    pub fn occupied_by_opponent_of(&self, team: TeamId) -> bool {
        self.occupant.is_some_and(|o| !o.team.allied_with(team))
    }
}
