//! Authoritative Simulation Tick
//!
//! The fixed phase sequence that advances a round. Runner motion,
//! pursuit replanning, hunter motion, and capture detection run in that
//! order, one phase completing before the next; the ordering is the
//! whole concurrency model.

use std::collections::BTreeMap;

use crate::core::cell::Direction;
use crate::game::capture::{check_captures, Capture};
use crate::game::events::GameEvent;
use crate::game::input::IntentLog;
use crate::game::motion::{apply_intents, move_hunters, move_runners};
use crate::game::pursuit::refresh_paths;
use crate::game::state::{RoundPhase, RoundState, RunnerId};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Runner captured this tick, ending the round
    pub captured: Option<RunnerId>,
}

/// Configuration for round simulation.
#[derive(Clone, Copy, Debug)]
pub struct RoundConfig {
    /// Euclidean distance below which a hunter captures a runner
    pub capture_threshold: f64,
    /// Per-axis distance at which a hunter locks onto its waypoint
    pub arrival_tolerance: f64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            capture_threshold: 0.5,
            arrival_tolerance: 0.1,
        }
    }
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The round state (will be mutated)
/// * `intents` - Runner intents for this tick (BTreeMap for deterministic order!)
/// * `config` - Round configuration
///
/// # Determinism
///
/// Identical state and intents produce identical results: iteration is
/// BTreeMap-ordered throughout, A* tie-breaks on insertion order, and
/// no clock, randomness, or hashing-order dependence exists anywhere
/// in the phase chain.
pub fn tick(
    state: &mut RoundState,
    intents: &BTreeMap<RunnerId, Direction>,
    config: &RoundConfig,
) -> TickResult {
    let mut result = TickResult::default();

    // A finished round ignores further ticks.
    if state.is_ended() {
        return result;
    }

    // 0. Advance tick counter
    state.tick += 1;

    // 1. Apply runner intents, then intent-driven motion
    apply_intents(state, intents);
    move_runners(state);

    // 2. Re-target and replan every hunter
    refresh_paths(state);

    // 3. Path-driven hunter motion
    move_hunters(state, config.arrival_tolerance);

    // 4. Capture check; first pair in range ends the round
    if let Some(capture) = check_captures(state, config.capture_threshold) {
        end_round(state, capture, &mut result);
    }

    // Collect events
    result.events = state.take_events();

    result
}

/// End the round on a capture.
fn end_round(state: &mut RoundState, capture: Capture, result: &mut TickResult) {
    state.phase = RoundPhase::Ended;
    state.captured = Some(capture.runner_id);
    result.captured = Some(capture.runner_id);

    state.push_event(GameEvent::runner_captured(
        state.tick,
        capture.runner_id,
        capture.hunter_id,
    ));
    state.push_event(GameEvent::round_ended(state.tick, capture.runner_id));
}

/// Replay a round from recorded intent logs.
///
/// Returns the final state and all events, for comparison against the
/// live run. The same `config` used live must be passed here.
pub fn replay_round(
    initial_state: RoundState,
    logs: &BTreeMap<RunnerId, IntentLog>,
    tick_count: u32,
    config: &RoundConfig,
) -> (RoundState, Vec<GameEvent>) {
    let mut state = initial_state;
    let mut all_events = Vec::new();

    let mut replays: BTreeMap<RunnerId, _> = logs
        .iter()
        .map(|(runner_id, log)| (*runner_id, log.replay_iter()))
        .collect();

    for _ in 0..tick_count {
        let mut intents = BTreeMap::new();
        for (runner_id, replay) in replays.iter_mut() {
            if let Some((_, Some(direction))) = replay.next() {
                intents.insert(*runner_id, direction);
            }
        }

        let result = tick(&mut state, &intents, config);
        all_events.extend(result.events);

        if result.captured.is_some() {
            break;
        }
    }

    (state, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::Cell;
    use crate::core::vec2::Vec2;
    use crate::game::events::GameEventData;
    use crate::game::grid::Grid;

    fn scripted_intents(runner_id: RunnerId, direction: Direction) -> BTreeMap<RunnerId, Direction> {
        let mut intents = BTreeMap::new();
        intents.insert(runner_id, direction);
        intents
    }

    #[test]
    fn test_runner_crosses_one_cell_in_two_ticks() {
        let mut state = RoundState::new(Grid::new(11));
        state.grid.place_pellet(Cell::new(2, 1));
        state.add_runner(RunnerId(0), Cell::new(1, 1), 0.5);
        let config = RoundConfig::default();
        let intents = BTreeMap::new();

        let first = tick(&mut state, &intents, &config);
        let second = tick(&mut state, &intents, &config);

        let runner = state.get_runner(RunnerId(0)).unwrap();
        assert_eq!(runner.position, Vec2::new(2.0, 1.0));
        assert_eq!(runner.cell(), Cell::new(2, 1));

        // The pellet pays out once, on the tick whose snap first lands
        // on its cell.
        assert_eq!(runner.score, 10);
        assert_eq!(first.events.len(), 1);
        assert!(matches!(
            first.events[0].data,
            GameEventData::PelletCollected { points: 10, .. }
        ));
        assert!(second.events.is_empty());
        assert_eq!(state.grid.pellets_remaining(), 0);
    }

    #[test]
    fn test_boxed_runner_is_captured_immediately() {
        // Runner and hunter share a cell that the runner cannot leave:
        // the pursuit path is empty and the capture fires on tick one.
        let mut state = RoundState::new(Grid::new(11));
        for cell in [
            Cell::new(4, 5),
            Cell::new(6, 5),
            Cell::new(5, 4),
            Cell::new(5, 6),
        ] {
            state.grid.set_wall(cell);
        }
        state.add_runner(RunnerId(0), Cell::new(5, 5), 0.5);
        let hunter_id = state.add_hunter(Cell::new(5, 5), 0.1);
        let config = RoundConfig::default();

        let result = tick(&mut state, &BTreeMap::new(), &config);

        assert_eq!(result.captured, Some(RunnerId(0)));
        assert!(state.is_ended());
        assert_eq!(state.captured, Some(RunnerId(0)));
        assert!(state.get_hunter(hunter_id).unwrap().path.is_empty());
        assert_eq!(
            state.get_runner(RunnerId(0)).unwrap().position,
            Vec2::new(5.0, 5.0)
        );

        let kinds: Vec<_> = result.events.iter().map(|e| &e.data).collect();
        assert!(matches!(
            kinds[0],
            GameEventData::RunnerCaptured {
                runner_id: RunnerId(0),
                ..
            }
        ));
        assert!(matches!(kinds[1], GameEventData::RoundEnded { .. }));
    }

    #[test]
    fn test_tick_after_end_is_noop() {
        let mut state = RoundState::new(Grid::new(11));
        state.add_runner(RunnerId(0), Cell::new(5, 5), 0.5);
        state.add_hunter(Cell::new(5, 5), 0.1);
        let config = RoundConfig::default();

        let first = tick(&mut state, &BTreeMap::new(), &config);
        assert!(first.captured.is_some());
        let tick_at_end = state.tick;
        let hash_at_end = state.compute_hash();

        let after = tick(&mut state, &BTreeMap::new(), &config);
        assert!(after.captured.is_none());
        assert!(after.events.is_empty());
        assert_eq!(state.tick, tick_at_end);
        assert_eq!(state.compute_hash(), hash_at_end);
    }

    #[test]
    fn test_hunter_runs_down_fleeing_runner() {
        let mut state = RoundState::new(Grid::new(9));
        state.add_runner(RunnerId(0), Cell::new(1, 1), 0.25);
        state.add_hunter(Cell::new(7, 1), 0.5);
        let config = RoundConfig::default();

        let mut captured = None;
        for _ in 0..20 {
            let result = tick(
                &mut state,
                &scripted_intents(RunnerId(0), Direction::Right),
                &config,
            );
            if let Some(runner_id) = result.captured {
                captured = Some(runner_id);
                break;
            }
        }

        assert_eq!(captured, Some(RunnerId(0)));
        assert!(state.is_ended());
    }

    #[test]
    fn test_tick_determinism() {
        let config = RoundConfig::default();
        let build = || {
            let mut state = RoundState::new(Grid::new(11));
            state.grid.fill_pellets();
            state.add_runner(RunnerId(0), Cell::new(1, 1), 0.5);
            state.add_runner(RunnerId(1), Cell::new(9, 9), 0.5);
            state.add_hunter(Cell::new(5, 5), 0.1);
            state.add_hunter(Cell::new(5, 6), 0.1);
            state
        };
        let mut state1 = build();
        let mut state2 = build();

        let script = [
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        for step in 0..50 {
            let direction = script[step % script.len()];
            let mut intents = BTreeMap::new();
            intents.insert(RunnerId(0), direction);
            intents.insert(RunnerId(1), direction.opposite());

            tick(&mut state1, &intents, &config);
            tick(&mut state2, &intents, &config);
        }

        assert_eq!(state1.tick, state2.tick);
        assert_eq!(state1.compute_hash(), state2.compute_hash());
        for (id, runner1) in &state1.runners {
            let runner2 = state2.runners.get(id).unwrap();
            assert_eq!(runner1.position, runner2.position);
            assert_eq!(runner1.score, runner2.score);
        }
    }

    #[test]
    fn test_replay_reproduces_live_hash() {
        let mut live = RoundState::new(Grid::new(9));
        live.grid.fill_pellets();
        live.add_runner(RunnerId(0), Cell::new(1, 1), 0.5);
        live.add_hunter(Cell::new(7, 7), 0.25);
        let initial = live.clone();
        let config = RoundConfig::default();

        let script = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
        ];
        let mut logs = BTreeMap::new();
        logs.insert(RunnerId(0), IntentLog::new(RunnerId(0)));
        let mut advanced = 0;
        for (step, direction) in script.iter().cycle().take(30).enumerate() {
            if let Some(log) = logs.get_mut(&RunnerId(0)) {
                log.record(step as u32, *direction);
            }
            let result = tick(
                &mut live,
                &scripted_intents(RunnerId(0), *direction),
                &config,
            );
            advanced += 1;
            if result.captured.is_some() {
                break;
            }
        }

        let (replayed, events) = replay_round(initial, &logs, advanced, &config);

        assert_eq!(replayed.tick, live.tick);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        if live.captured.is_some() {
            assert!(events
                .iter()
                .any(|e| matches!(e.data, GameEventData::RoundEnded { .. })));
        }
    }
}
