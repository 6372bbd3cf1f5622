//! Agent Motion
//!
//! Intent-driven motion for runners and path-driven motion for hunters.
//! Every continuous-to-grid conversion goes through [`Vec2::snap`], so
//! wall checks and pellet collection always agree on the cell.

use std::collections::BTreeMap;

use crate::core::cell::Direction;
use crate::core::vec2::Vec2;
use crate::game::events::GameEvent;
use crate::game::state::{RoundState, RunnerId};

/// Apply queued direction intents to their runners.
///
/// Runners without a queued intent keep their previous direction.
/// Intents for unknown runners are dropped; the session boundary
/// rejects those before they reach the simulation.
pub fn apply_intents(state: &mut RoundState, intents: &BTreeMap<RunnerId, Direction>) {
    for (runner_id, direction) in intents {
        if let Some(runner) = state.runners.get_mut(runner_id) {
            runner.direction = *direction;
        }
    }
}

/// Advance every runner along its current intent.
///
/// The candidate position is one `speed` step in the intent direction.
/// It is accepted only when its snapped cell is in range and not a
/// wall; a rejected candidate leaves the runner in place with the
/// intent retained, so movement resumes by itself once the way is
/// clear. Acceptance also collects any pellet at the snapped cell.
pub fn move_runners(state: &mut RoundState) {
    let tick = state.tick;
    let mut events: Vec<GameEvent> = Vec::new();

    for runner in state.runners.values_mut() {
        let (dx, dy) = runner.direction.delta();
        let candidate = Vec2::new(
            runner.position.x + dx as f64 * runner.speed,
            runner.position.y + dy as f64 * runner.speed,
        );
        let cell = candidate.snap();
        if state.grid.is_wall(cell) {
            continue;
        }

        runner.position = candidate;
        let points = state.grid.collect(cell);
        if points > 0 {
            runner.add_score(points);
            events.push(GameEvent::pellet_collected(
                tick,
                runner.id,
                cell,
                points,
                runner.score,
            ));
        }
    }

    state.pending_events.extend(events);
}

/// Advance every hunter toward the head of its path.
///
/// Each axis steps by `speed` toward the waypoint independently,
/// clamped so it never overshoots. Once both axes are strictly within
/// `arrival_tolerance` the hunter snaps exactly onto the waypoint and
/// pops it. Hunters with an empty path stand still.
pub fn move_hunters(state: &mut RoundState, arrival_tolerance: f64) {
    for hunter in state.hunters.values_mut() {
        let Some(&waypoint) = hunter.path.first() else {
            continue;
        };
        let goal = Vec2::from_cell(waypoint);
        let speed = hunter.speed;

        hunter.position.x += (goal.x - hunter.position.x).clamp(-speed, speed);
        hunter.position.y += (goal.y - hunter.position.y).clamp(-speed, speed);

        if (goal.x - hunter.position.x).abs() < arrival_tolerance
            && (goal.y - hunter.position.y).abs() < arrival_tolerance
        {
            hunter.position = goal;
            hunter.path.remove(0);
        }
    }
}
