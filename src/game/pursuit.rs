//! Pursuit Coordination
//!
//! Once per tick every hunter re-targets the nearest runner and has its
//! path replaced wholesale. Replanning from scratch keeps a hunter at
//! most one tick behind any runner turn.

use crate::core::cell::Cell;
use crate::game::state::{RoundState, RunnerId};

/// Refresh every hunter's path toward its nearest runner.
///
/// Hunters are visited in `HunterId` order. The target is the runner
/// with the smallest Manhattan distance between continuous positions;
/// ties keep the first runner in `RunnerId` order. The fresh path runs
/// from the hunter's snapped cell to the target's snapped cell and
/// replaces the old path even when the old one was still valid.
pub fn refresh_paths(state: &mut RoundState) {
    let RoundState {
        grid,
        runners,
        hunters,
        planner,
        ..
    } = state;

    for hunter in hunters.values_mut() {
        let mut nearest: Option<(f64, RunnerId, Cell)> = None;
        for (runner_id, runner) in runners.iter() {
            let distance = hunter.position.manhattan_distance(runner.position);
            // Strict comparison keeps the earlier runner on ties.
            if nearest.is_none_or(|(best, _, _)| distance < best) {
                nearest = Some((distance, *runner_id, runner.cell()));
            }
        }

        match nearest {
            Some((_, _, target_cell)) => {
                planner.find_path_into(grid, hunter.cell(), target_cell, &mut hunter.path);
            }
            None => hunter.path.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::grid::Grid;

    fn open_round(size: u32) -> RoundState {
        RoundState::new(Grid::new(size))
    }

    #[test]
    fn test_targets_nearest_runner() {
        let mut state = open_round(9);
        state.add_runner(RunnerId(0), Cell::new(1, 1), 0.5);
        state.add_runner(RunnerId(1), Cell::new(5, 3), 0.5);
        let hunter_id = state.add_hunter(Cell::new(5, 5), 0.1);

        refresh_paths(&mut state);

        let path = &state.get_hunter(hunter_id).unwrap().path;
        assert_eq!(path.last(), Some(&Cell::new(5, 3)));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_tie_keeps_first_runner_id() {
        let mut state = open_round(9);
        // Both runners sit 2 cells from the hunter.
        state.add_runner(RunnerId(3), Cell::new(2, 4), 0.5);
        state.add_runner(RunnerId(7), Cell::new(6, 4), 0.5);
        let hunter_id = state.add_hunter(Cell::new(4, 4), 0.1);

        refresh_paths(&mut state);

        let path = &state.get_hunter(hunter_id).unwrap().path;
        assert_eq!(path.last(), Some(&Cell::new(2, 4)));
    }

    #[test]
    fn test_nearest_uses_continuous_positions() {
        let mut state = open_round(9);
        state.add_runner(RunnerId(0), Cell::new(2, 4), 0.5);
        state.add_runner(RunnerId(1), Cell::new(6, 4), 0.5);
        // Nudge runner 1 closer than its cell distance suggests.
        if let Some(runner) = state.get_runner_mut(RunnerId(1)) {
            runner.position = Vec2::new(5.4, 4.0);
        }
        let hunter_id = state.add_hunter(Cell::new(4, 4), 0.1);

        refresh_paths(&mut state);

        // Runner 1 is 1.4 away against runner 0's 2.0, and still snaps
        // to cell (5, 4).
        let path = &state.get_hunter(hunter_id).unwrap().path;
        assert_eq!(path.last(), Some(&Cell::new(5, 4)));
    }

    #[test]
    fn test_path_replaced_unconditionally() {
        let mut state = open_round(9);
        state.add_runner(RunnerId(0), Cell::new(7, 7), 0.5);
        let hunter_id = state.add_hunter(Cell::new(1, 1), 0.1);

        refresh_paths(&mut state);
        let first_len = state.get_hunter(hunter_id).unwrap().path.len();
        assert_eq!(first_len, 12);

        // Runner moved; next refresh rebuilds rather than trims.
        if let Some(runner) = state.get_runner_mut(RunnerId(0)) {
            runner.position = Vec2::new(1.0, 3.0);
        }
        refresh_paths(&mut state);
        let path = &state.get_hunter(hunter_id).unwrap().path;
        assert_eq!(path.last(), Some(&Cell::new(1, 3)));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_no_runners_clears_path() {
        let mut state = open_round(9);
        let hunter_id = state.add_hunter(Cell::new(4, 4), 0.1);
        if let Some(hunter) = state.hunters.get_mut(&hunter_id) {
            hunter.path = vec![Cell::new(5, 4), Cell::new(6, 4)];
        }

        refresh_paths(&mut state);

        assert!(state.get_hunter(hunter_id).unwrap().path.is_empty());
        assert_eq!(
            state.get_hunter(hunter_id).unwrap().position,
            Vec2::new(4.0, 4.0)
        );
    }

    #[test]
    fn test_shared_cell_yields_empty_path() {
        let mut state = open_round(11);
        state.add_runner(RunnerId(0), Cell::new(5, 5), 0.5);
        let hunter_id = state.add_hunter(Cell::new(5, 5), 0.1);

        refresh_paths(&mut state);

        assert!(state.get_hunter(hunter_id).unwrap().path.is_empty());
    }
}
