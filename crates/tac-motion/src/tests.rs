//! Unit tests for tac-motion.
//!
//! Machines are driven by synthetic clocks — no real time passes anywhere.

#[cfg(test)]
mod helpers {
    use tac_core::{Coord, SimTime, TeamId, UnitId};
    use tac_grid::{LeapSearch, Tile, TileGrid, TileGridBuilder};

    use crate::{MotionEngine, MotionPhase, MotionState};

    pub const ME: UnitId = UnitId(0);
    pub const ALLY: UnitId = UnitId(1);
    pub const MY_TEAM: TeamId = TeamId(0);

    /// Flat east-west corridor `(0,0) ..= (len-1, 0)`, nobody placed.
    pub fn corridor(len: i32) -> TileGrid {
        let mut b = TileGridBuilder::new();
        for x in 0..len {
            b.add_tile(Tile::flat(Coord::new(x, 0), 0));
        }
        b.build().unwrap()
    }

    /// Corridor with per-tile elevations.
    pub fn stepped(elevations: &[i32]) -> TileGrid {
        let mut b = TileGridBuilder::new();
        for (x, &z) in elevations.iter().enumerate() {
            b.add_tile(Tile::flat(Coord::new(x as i32, 0), z));
        }
        b.build().unwrap()
    }

    pub fn engine() -> MotionEngine<LeapSearch> {
        MotionEngine::new(LeapSearch)
    }

    /// Tick `state` on a fixed-step clock until it goes idle, returning
    /// the distinct phases observed in order.  Panics (fails the test) if
    /// the machine doesn't settle within `max_secs`.
    pub fn run_to_idle(
        state: &mut MotionState,
        grid: &TileGrid,
        start: SimTime,
        step: f64,
        max_secs: f64,
    ) -> Vec<&'static str> {
        let mut phases = vec![tag(state.phase())];
        let mut now = start;
        let deadline = start.after(max_secs);
        while !state.phase().is_idle() {
            assert!(now < deadline, "machine failed to settle; saw {phases:?}");
            now = now.after(step);
            state.advance(grid, now);
            let t = tag(state.phase());
            if phases.last() != Some(&t) {
                phases.push(t);
            }
        }
        phases
    }

    pub fn tag(phase: MotionPhase) -> &'static str {
        match phase {
            MotionPhase::Idle => "idle",
            MotionPhase::Walking => "walk",
            MotionPhase::Leaping(_) => "leap",
            MotionPhase::JumpingUp(_) => "jump",
            MotionPhase::Finished => "finished",
        }
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod facing {
    use tac_core::Coord;

    use crate::Facing;

    #[test]
    fn cardinal_directions() {
        let o = Coord::new(0, 0);
        assert_eq!(Facing::toward(o, Coord::new(-2, 0)), Facing::FrontLeft);
        assert_eq!(Facing::toward(o, Coord::new(0, -2)), Facing::FrontRight);
        assert_eq!(Facing::toward(o, Coord::new(0, 2)), Facing::BackLeft);
        assert_eq!(Facing::toward(o, Coord::new(2, 0)), Facing::BackRight);
    }

    #[test]
    fn exact_diagonals_prefer_camera_front() {
        let o = Coord::new(0, 0);
        assert_eq!(Facing::toward(o, Coord::new(-1, 1)), Facing::FrontLeft);
        assert_eq!(Facing::toward(o, Coord::new(-1, -1)), Facing::FrontLeft);
        assert_eq!(Facing::toward(o, Coord::new(1, -1)), Facing::FrontRight);
        assert_eq!(Facing::toward(o, Coord::new(1, 1)), Facing::BackLeft);
    }
}

// ── Machine ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod machine {
    use tac_core::{Coord, SimTime};
    use tac_grid::Path;

    use super::helpers::{corridor, run_to_idle, stepped, ME, MY_TEAM};
    use crate::{LeapStage, MotionPhase, MotionState};

    fn path(coords: &[(i32, i32)]) -> Path {
        Path {
            waypoints: coords.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        }
    }

    #[test]
    fn empty_path_is_a_noop() {
        let grid = corridor(3);
        let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);
        state.begin_path(&grid, path(&[]), SimTime::ZERO);
        assert!(state.phase().is_idle());
        assert!(!state.advance(&grid, SimTime(1.0)));
        assert!(state.phase().is_idle());
    }

    #[test]
    fn walk_then_leap_sequence() {
        // Two waypoints: an adjacent flat step, then a 3-tile leap.  The
        // machine must visit Walking then a leap-family phase in that
        // order, ending Idle with the queue empty.
        let grid = corridor(5);
        let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);
        state.begin_path(&grid, path(&[(1, 0), (4, 0)]), SimTime::ZERO);
        assert_eq!(state.phase(), MotionPhase::Walking);

        let phases = run_to_idle(&mut state, &grid, SimTime::ZERO, 0.05, 10.0);
        assert_eq!(phases, vec!["walk", "leap", "finished", "idle"]);
        assert_eq!(state.waypoints_remaining(), 0);
        assert_eq!(state.coord(), Coord::new(4, 0));
    }

    #[test]
    fn phase_selection_per_waypoint() {
        // dz = +3 adjacent → JumpingUp; dz = -3 adjacent → Leaping
        // (fall-down); dz within ±1 → Walking.
        let grid = stepped(&[0, 3, 3, 0, 1]);
        let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);

        state.begin_path(&grid, path(&[(1, 0)]), SimTime::ZERO);
        assert!(matches!(state.phase(), MotionPhase::JumpingUp(_)));
        state.cancel();

        let mut high = MotionState::stationary(ME, MY_TEAM, Coord::new(2, 0), &grid);
        high.begin_path(&grid, path(&[(3, 0)]), SimTime::ZERO);
        assert!(matches!(high.phase(), MotionPhase::Leaping(_)));

        let mut flat = MotionState::stationary(ME, MY_TEAM, Coord::new(3, 0), &grid);
        flat.begin_path(&grid, path(&[(4, 0)]), SimTime::ZERO);
        assert_eq!(flat.phase(), MotionPhase::Walking);
    }

    #[test]
    fn crouch_deadline_is_absolute() {
        let grid = corridor(4);
        let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);
        state.begin_path(&grid, path(&[(2, 0)]), SimTime::ZERO);

        let MotionPhase::Leaping(LeapStage::Crouch { until }) = state.phase() else {
            panic!("expected crouch, got {:?}", state.phase());
        };

        // Ticks before the deadline leave the crouch in place...
        state.advance(&grid, SimTime(until.0 - 0.01));
        assert!(matches!(
            state.phase(),
            MotionPhase::Leaping(LeapStage::Crouch { .. })
        ));
        // ...and one past it lifts off, however late it lands.
        state.advance(&grid, SimTime(until.0 + 5.0));
        assert!(matches!(
            state.phase(),
            MotionPhase::Leaping(LeapStage::Airborne)
        ));
    }

    #[test]
    fn leap_arc_rises_then_returns() {
        let grid = corridor(4);
        let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);
        state.begin_path(&grid, path(&[(3, 0)]), SimTime::ZERO);

        // Skip the crouch, then sample mid-flight.
        let mut now = SimTime(0.3);
        state.advance(&grid, now);
        let mut peak: f32 = 0.0;
        while matches!(state.phase(), MotionPhase::Leaping(LeapStage::Airborne)) {
            now = now.after(0.02);
            state.advance(&grid, now);
            peak = peak.max(state.position().z);
        }
        assert!(peak > 0.5, "leap never left the ground (peak {peak})");
        // Touchdown is exactly on the target surface.
        assert_eq!(state.position().z, 0.0);
        assert_eq!(state.position().x, 3.0);
    }

    #[test]
    fn tick_rate_does_not_change_the_outcome() {
        for step in [0.01, 0.07, 0.25] {
            let grid = corridor(5);
            let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);
            state.begin_path(&grid, path(&[(1, 0), (4, 0)]), SimTime::ZERO);
            let phases = run_to_idle(&mut state, &grid, SimTime::ZERO, step, 20.0);
            assert_eq!(
                phases,
                vec!["walk", "leap", "finished", "idle"],
                "divergence at step {step}"
            );
            assert_eq!(state.coord(), Coord::new(4, 0));
        }
    }

    #[test]
    fn finished_is_observable_once() {
        let grid = corridor(2);
        let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);
        state.begin_path(&grid, path(&[(1, 0)]), SimTime::ZERO);

        let mut now = SimTime::ZERO;
        let mut completions = 0;
        for _ in 0..100 {
            now = now.after(0.05);
            if state.advance(&grid, now) {
                completions += 1;
                assert_eq!(state.phase(), MotionPhase::Finished);
            }
        }
        assert_eq!(completions, 1, "move must complete exactly once");
        assert!(state.phase().is_idle());
    }

    #[test]
    fn cancel_forces_idle_in_place() {
        let grid = corridor(5);
        let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);
        state.begin_path(&grid, path(&[(1, 0), (2, 0), (3, 0)]), SimTime::ZERO);
        state.advance(&grid, SimTime(0.1));
        assert!(state.is_moving());

        state.cancel();
        assert!(state.phase().is_idle());
        assert_eq!(state.waypoints_remaining(), 0);
        // Cancelling mid-segment never teleports the unit onward.
        assert_eq!(state.coord(), Coord::new(0, 0));
    }

    #[test]
    fn facing_follows_each_segment() {
        let grid = corridor(3);
        let mut state = MotionState::stationary(ME, MY_TEAM, Coord::new(0, 0), &grid);
        state.begin_path(&grid, path(&[(1, 0)]), SimTime::ZERO);
        assert_eq!(state.facing(), crate::Facing::BackRight);
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use tac_core::{Coord, SimTime};
    use tac_grid::MoveProfile;

    use super::helpers::{corridor, engine, ALLY, ME, MY_TEAM};
    use crate::{MotionError, MotionPhase};

    fn profile(budget: u32) -> MoveProfile {
        MoveProfile::new(budget, 2, 1, MY_TEAM)
    }

    #[test]
    fn place_couples_occupancy_and_machine() {
        let mut grid = corridor(3);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();

        assert_eq!(grid.tile(Coord::new(0, 0)).unwrap().occupant.unwrap().unit, ME);
        let (pos, phase, _) = eng.visual(ME).unwrap();
        assert_eq!(phase, MotionPhase::Idle);
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn plan_requires_placement() {
        let grid = corridor(3);
        let mut eng = engine();
        assert!(matches!(
            eng.plan_reach(&grid, ME, &profile(2)),
            Err(MotionError::NotPlaced(_))
        ));
    }

    #[test]
    fn move_requires_a_plan() {
        let mut grid = corridor(3);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();
        assert!(matches!(
            eng.start_move(&mut grid, ME, Coord::new(1, 0), SimTime::ZERO),
            Err(MotionError::NoReachMap(_))
        ));
    }

    #[test]
    fn unreachable_destination_is_recoverable() {
        let mut grid = corridor(6);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();
        eng.plan_reach(&grid, ME, &profile(1)).unwrap();

        let err = eng.start_move(&mut grid, ME, Coord::new(5, 0), SimTime::ZERO);
        assert!(matches!(
            err,
            Err(MotionError::Grid(tac_grid::GridError::Unreachable(_)))
        ));
        // Nothing was applied: occupancy and phase are untouched.
        assert_eq!(grid.find_unit(ME), Some(Coord::new(0, 0)));
        assert!(!eng.state(ME).unwrap().is_moving());
    }

    #[test]
    fn ally_tile_is_mapped_but_not_landable() {
        let mut grid = corridor(4);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();
        eng.place(&mut grid, ALLY, MY_TEAM, Coord::new(1, 0)).unwrap();

        let map = eng.plan_reach(&grid, ME, &profile(3)).unwrap();
        assert!(map.contains(Coord::new(1, 0)), "ally tile is pass-through");

        let err = eng.start_move(&mut grid, ME, Coord::new(1, 0), SimTime::ZERO);
        assert!(matches!(err, Err(MotionError::DestinationOccupied(_))));
    }

    #[test]
    fn handoff_is_atomic_at_move_start() {
        let mut grid = corridor(4);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();
        eng.plan_reach(&grid, ME, &profile(3)).unwrap();

        eng.start_move(&mut grid, ME, Coord::new(3, 0), SimTime::ZERO).unwrap();

        // Before a single tick of animation, occupancy already sits on the
        // final destination; intermediate tiles are never marked.
        assert!(!grid.tile(Coord::new(0, 0)).unwrap().is_occupied());
        assert!(!grid.tile(Coord::new(1, 0)).unwrap().is_occupied());
        assert!(!grid.tile(Coord::new(2, 0)).unwrap().is_occupied());
        assert_eq!(grid.tile(Coord::new(3, 0)).unwrap().occupant.unwrap().unit, ME);

        // The reach map was consumed by the move.
        assert!(eng.reach_map(ME).is_none());
    }

    #[test]
    fn full_move_runs_to_completion() {
        let mut grid = corridor(4);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();
        eng.plan_reach(&grid, ME, &profile(3)).unwrap();
        eng.start_move(&mut grid, ME, Coord::new(3, 0), SimTime::ZERO).unwrap();

        let mut now = SimTime::ZERO;
        let mut finished = Vec::new();
        for _ in 0..400 {
            now = now.after(0.05);
            finished.extend(eng.advance(&grid, now));
            if !finished.is_empty() {
                break;
            }
        }
        assert_eq!(finished, vec![ME]);

        let state = eng.state(ME).unwrap();
        assert_eq!(state.coord(), Coord::new(3, 0));
        let (pos, _, _) = eng.visual(ME).unwrap();
        assert_eq!(pos.x, 3.0);
    }

    #[test]
    fn concurrent_commands_are_rejected() {
        let mut grid = corridor(4);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();
        eng.plan_reach(&grid, ME, &profile(3)).unwrap();
        eng.start_move(&mut grid, ME, Coord::new(2, 0), SimTime::ZERO).unwrap();

        assert!(matches!(
            eng.plan_reach(&grid, ME, &profile(3)),
            Err(MotionError::AlreadyMoving(_))
        ));
        assert!(matches!(
            eng.start_move(&mut grid, ME, Coord::new(3, 0), SimTime::ZERO),
            Err(MotionError::AlreadyMoving(_))
        ));
    }

    #[test]
    fn trivial_move_is_a_noop() {
        let mut grid = corridor(3);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();
        eng.plan_reach(&grid, ME, &profile(2)).unwrap();

        let path = eng.start_move(&mut grid, ME, Coord::new(0, 0), SimTime::ZERO).unwrap();
        assert!(path.is_trivial());
        assert_eq!(grid.find_unit(ME), Some(Coord::new(0, 0)));
        assert!(!eng.state(ME).unwrap().is_moving());
    }

    #[test]
    fn cancel_keeps_destination_occupancy() {
        // The engine does not auto-revert the handoff; that rollback is
        // the caller's policy.
        let mut grid = corridor(4);
        let mut eng = engine();
        eng.place(&mut grid, ME, MY_TEAM, Coord::new(0, 0)).unwrap();
        eng.plan_reach(&grid, ME, &profile(3)).unwrap();
        eng.start_move(&mut grid, ME, Coord::new(3, 0), SimTime::ZERO).unwrap();

        eng.cancel(ME).unwrap();
        assert!(!eng.state(ME).unwrap().is_moving());
        assert_eq!(grid.find_unit(ME), Some(Coord::new(3, 0)));
    }
}
