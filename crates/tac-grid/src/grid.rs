//! Tile grid storage and builder.
//!
//! # Data layout
//!
//! The grid is an exact-keyed `FxHashMap<Coord, Tile>` — tactics maps are
//! sparse (painted cells only) and coordinates are integers, so hashing the
//! key beats any spatial index.  The map is frozen at build time; the only
//! mutation the grid permits afterwards is the occupancy slot on each tile,
//! via [`TileGrid::place`]/[`vacate`][TileGrid::vacate]/
//! [`handoff`][TileGrid::handoff].
//!
//! # Validation
//!
//! `TileGridBuilder::build` rejects malformed input (duplicate coordinates,
//! inverted surface offsets, zero movement cost) so searches never have to
//! re-check data-model invariants mid-expansion.

use rustc_hash::FxHashMap;

use tac_core::{Coord, TeamId, UnitId};

use crate::tile::{Occupant, Tile};
use crate::{GridError, GridResult};

// ── TileGrid ──────────────────────────────────────────────────────────────────

/// The read-only substrate every search and move command queries: a mapping
/// from integer (x, y) coordinates to tile descriptors.
///
/// Owned by the match/session for the scene's duration.  Do not construct
/// directly; use [`TileGridBuilder`].
pub struct TileGrid {
    tiles: FxHashMap<Coord, Tile>,
}

impl TileGrid {
    /// A grid with no tiles.  Any search against it fails with
    /// [`GridError::InvalidOrigin`].
    pub fn empty() -> Self {
        Self { tiles: FxHashMap::default() }
    }

    // ── Read API ──────────────────────────────────────────────────────────

    #[inline]
    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.tiles.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate all tiles in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// The standing height at `coord`, if a tile exists there.
    #[inline]
    pub fn standing_height(&self, coord: Coord) -> Option<i32> {
        self.tile(coord).map(Tile::standing_height)
    }

    /// Where `unit` currently stands, scanning occupancy slots.  O(n); the
    /// motion layer keeps its own unit → coord index for the hot path.
    pub fn find_unit(&self, unit: UnitId) -> Option<Coord> {
        self.tiles
            .values()
            .find(|t| t.occupant.is_some_and(|o| o.unit == unit))
            .map(|t| t.coord)
    }

    // ── Occupancy mutation ────────────────────────────────────────────────

    /// Couple `unit` to the tile at `coord` (initial placement).
    ///
    /// # Errors
    /// `TileNotFound` if the coordinate is empty space, `TileOccupied` if
    /// another unit already stands there.
    pub fn place(&mut self, unit: UnitId, team: TeamId, coord: Coord) -> GridResult<()> {
        let tile = self
            .tiles
            .get_mut(&coord)
            .ok_or(GridError::TileNotFound(coord))?;
        if tile.occupant.is_some() {
            return Err(GridError::TileOccupied(coord));
        }
        tile.occupant = Some(Occupant { unit, team });
        Ok(())
    }

    /// Decouple whatever stands at `coord`, returning the occupant.
    pub fn vacate(&mut self, coord: Coord) -> GridResult<Occupant> {
        let tile = self
            .tiles
            .get_mut(&coord)
            .ok_or(GridError::TileNotFound(coord))?;
        tile.occupant.take().ok_or(GridError::TileVacant(coord))
    }

    /// The atomic move-start occupancy transfer: decouple `from`, couple
    /// the same occupant to `to`.  Intermediate waypoints of the move are
    /// never touched.
    ///
    /// Nothing is mutated unless both tiles validate, so a failed handoff
    /// leaves occupancy exactly as it was.
    pub fn handoff(&mut self, from: Coord, to: Coord) -> GridResult<()> {
        let occupant = {
            let src = self.tiles.get(&from).ok_or(GridError::TileNotFound(from))?;
            src.occupant.ok_or(GridError::TileVacant(from))?
        };
        {
            let dst = self.tiles.get(&to).ok_or(GridError::TileNotFound(to))?;
            if dst.occupant.is_some() {
                return Err(GridError::TileOccupied(to));
            }
        }
        // Both ends validated; apply.
        if let Some(src) = self.tiles.get_mut(&from) {
            src.occupant = None;
        }
        if let Some(dst) = self.tiles.get_mut(&to) {
            dst.occupant = Some(occupant);
        }
        Ok(())
    }
}

// ── TileGridBuilder ───────────────────────────────────────────────────────────

/// Construct a [`TileGrid`] incrementally, then call [`build`](Self::build).
///
/// Tiles may be added in any order.  `build()` validates the data-model
/// invariants and fails with the first violation found.
///
/// # Example
///
/// ```
/// use tac_core::Coord;
/// use tac_grid::{Tile, TileGridBuilder};
///
/// let mut b = TileGridBuilder::new();
/// for x in 0..3 {
///     b.add_tile(Tile::flat(Coord::new(x, 0), 0));
/// }
/// let grid = b.build().unwrap();
/// assert_eq!(grid.len(), 3);
/// ```
pub struct TileGridBuilder {
    tiles: Vec<Tile>,
}

impl TileGridBuilder {
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Pre-allocate for the expected tile count when scanning a painted map.
    pub fn with_capacity(tiles: usize) -> Self {
        Self { tiles: Vec::with_capacity(tiles) }
    }

    /// Add a tile descriptor.  Duplicates are caught at `build()`.
    pub fn add_tile(&mut self, tile: Tile) -> &mut Self {
        self.tiles.push(tile);
        self
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Consume the builder and produce a validated [`TileGrid`].
    ///
    /// # Errors
    /// `DuplicateTile`, `InvertedSurface`, or `ZeroMovementCost` — the
    /// malformed-grid taxonomy.  A grid that builds never raises these
    /// again.
    pub fn build(self) -> GridResult<TileGrid> {
        let mut tiles = FxHashMap::default();
        tiles.reserve(self.tiles.len());

        for tile in self.tiles {
            if tile.surface_min_offset > tile.surface_max_offset {
                return Err(GridError::InvertedSurface {
                    coord: tile.coord,
                    min: tile.surface_min_offset,
                    max: tile.surface_max_offset,
                });
            }
            if tile.movement_cost == 0 {
                return Err(GridError::ZeroMovementCost(tile.coord));
            }
            if tiles.insert(tile.coord, tile).is_some() {
                return Err(GridError::DuplicateTile(tile.coord));
            }
        }

        Ok(TileGrid { tiles })
    }
}

impl Default for TileGridBuilder {
    fn default() -> Self {
        Self::new()
    }
}
