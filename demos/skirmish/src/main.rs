//! skirmish — smallest example for the rust_tactics movement core.
//!
//! Generates a seeded 12×8 hill terrain with a river and a few boulders,
//! places two opposing units, renders the hero's reachable tiles as ASCII,
//! then drives one full move (walk/leap/jump choreography) on a synthetic
//! 30 Hz clock, logging every phase transition.

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tac_core::{Coord, SimTime, TeamId, UnitId};
use tac_grid::{is_open_landing, LeapSearch, MoveProfile, Tile, TileGrid, TileGridBuilder};
use tac_motion::{MotionEngine, MotionPhase};

// ── Constants ─────────────────────────────────────────────────────────────────

const MAP_W:      i32 = 12;
const MAP_H:      i32 = 8;
const SEED:       u64 = 42;
const RIVER_X:    i32 = 5;
const BOULDERS:   usize = 4;
const TICK_SECS:  f64 = 1.0 / 30.0;

const HERO:  UnitId = UnitId(0);
const RIVAL: UnitId = UnitId(1);
const BLUE:  TeamId = TeamId(0);
const RED:   TeamId = TeamId(1);

const HERO_START:  Coord = Coord { x: 1, y: 4 };
const RIVAL_START: Coord = Coord { x: 9, y: 4 };

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Rolling hills with a liquid river column and a handful of impassable
/// boulders.  Everything is derived from SEED, so reruns are identical.
fn build_terrain(rng: &mut SmallRng) -> Result<TileGrid> {
    // Boulders: tall and inaccessible, but still leapable-over if the
    // jumper clears their top.
    let mut boulders = Vec::new();
    while boulders.len() < BOULDERS {
        let coord = Coord::new(rng.gen_range(0..MAP_W), rng.gen_range(0..MAP_H));
        if coord == HERO_START || coord == RIVAL_START || coord.x == RIVER_X {
            continue;
        }
        if !boulders.contains(&coord) {
            boulders.push(coord);
        }
    }

    let mut builder = TileGridBuilder::with_capacity((MAP_W * MAP_H) as usize);
    for y in 0..MAP_H {
        for x in 0..MAP_W {
            let coord = Coord::new(x, y);
            let mut tile = Tile::flat(coord, rng.gen_range(0..=3));
            if x == RIVER_X {
                tile.elevation = 0;
                tile.liquid = true;
                tile.movement_cost = 2;
            } else if boulders.contains(&coord) {
                tile.elevation = 4;
                tile.inaccessible = true;
            }
            builder.add_tile(tile);
        }
    }

    builder.build().context("terrain failed validation")
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn render(grid: &TileGrid, reach: &tac_grid::ReachMap) {
    for y in 0..MAP_H {
        let mut row = String::with_capacity(MAP_W as usize * 2);
        for x in 0..MAP_W {
            let coord = Coord::new(x, y);
            let glyph = match grid.tile(coord) {
                Some(t) if t.occupant.is_some_and(|o| o.unit == HERO) => '@',
                Some(t) if t.occupant.is_some_and(|o| o.unit == RIVAL) => 'E',
                Some(t) if t.inaccessible => '#',
                Some(t) if t.liquid => '~',
                Some(_) if coord == reach.origin() => '@',
                Some(_) if reach.contains(coord) => '.',
                Some(t) => char::from_digit(t.surface_max() as u32, 10).unwrap_or('?'),
                None => ' ',
            };
            row.push(glyph);
            row.push(' ');
        }
        println!("{row}");
    }
}

fn phase_name(phase: MotionPhase) -> &'static str {
    match phase {
        MotionPhase::Idle => "idle",
        MotionPhase::Walking => "walking",
        MotionPhase::Leaping(_) => "leaping",
        MotionPhase::JumpingUp(_) => "jumping-up",
        MotionPhase::Finished => "finished",
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let mut grid = build_terrain(&mut rng)?;

    let mut engine = MotionEngine::new(LeapSearch);
    engine.place(&mut grid, HERO, BLUE, HERO_START)?;
    engine.place(&mut grid, RIVAL, RED, RIVAL_START)?;

    let profile = MoveProfile::new(5, 2, 2, BLUE);
    engine.plan_reach(&grid, HERO, &profile)?;
    let reach = engine
        .reach_map(HERO)
        .context("hero has no reach map")?;
    println!(
        "hero @ {HERO_START} can reach {} tiles (budget {}, jump {}, leap {}):\n",
        reach.len(),
        profile.movement_budget,
        profile.jump_allowance,
        profile.leap_allowance,
    );
    render(&grid, reach);

    // Farthest open landing wins the demo's attention.
    let destination = reach
        .coords()
        .filter(|&c| is_open_landing(&grid, c))
        .max_by_key(|c| (c.manhattan(HERO_START), c.x, c.y))
        .context("no open destination in range")?;

    let path = engine.start_move(&mut grid, HERO, destination, SimTime::ZERO)?;
    println!("\nmoving to {destination} via {} waypoint(s):", path.len());
    for wp in &path.waypoints {
        println!("  -> {wp}");
    }

    let mut now = SimTime::ZERO;
    let mut last_phase = phase_name(MotionPhase::Idle);
    loop {
        now = now.after(TICK_SECS);
        let finished = engine.advance(&grid, now);

        let (pos, phase, facing) = engine.visual(HERO).context("hero vanished")?;
        let name = phase_name(phase);
        if name != last_phase {
            println!("t={now}  {name:<10}  pos={pos}  facing={facing:?}");
            last_phase = name;
        }

        if finished.contains(&HERO) {
            println!("\nhero arrived at {} after {now}", destination);
            break;
        }
        if now.0 > 60.0 {
            anyhow::bail!("move failed to complete within 60 simulated seconds");
        }
    }

    Ok(())
}
