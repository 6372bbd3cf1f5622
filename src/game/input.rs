//! Intent Capture and Recording
//!
//! Per-runner direction intents, delta-compressed for replay.
//! A runner's intent persists until replaced, so only changes are
//! worth storing.

use serde::{Deserialize, Serialize};

use crate::core::cell::Direction;
use crate::core::hash::{StateHash, StateHasher};
use crate::game::state::RunnerId;

/// Delta-compressed intent entry.
///
/// Only stored when the effective direction CHANGES (not every tick).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDelta {
    /// Tick when this direction took effect
    pub tick: u32,
    /// The new direction
    pub direction: Direction,
}

impl IntentDelta {
    /// Create new delta entry.
    pub fn new(tick: u32, direction: Direction) -> Self {
        Self { tick, direction }
    }
}

/// Complete intent recording for one runner in one round.
///
/// Used for replay playback and determinism verification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntentLog {
    /// Runner identifier
    pub runner_id: RunnerId,

    /// First recorded tick (0 for runners present at round start)
    pub start_tick: u32,

    /// Last recorded tick
    pub end_tick: u32,

    /// Delta-compressed intent data.
    /// Only stores ticks where the direction changed.
    deltas: Vec<IntentDelta>,

    /// Last recorded direction (for delta comparison)
    #[serde(skip)]
    last: Option<Direction>,
}

impl IntentLog {
    /// Create a new intent log for a runner.
    pub fn new(runner_id: RunnerId) -> Self {
        Self {
            runner_id,
            start_tick: 0,
            end_tick: 0,
            deltas: Vec::new(),
            last: None,
        }
    }

    /// Record the effective direction for a tick.
    ///
    /// Only stores an entry if the direction changed.
    pub fn record(&mut self, tick: u32, direction: Direction) {
        self.end_tick = tick;
        if self.last != Some(direction) {
            self.deltas.push(IntentDelta::new(tick, direction));
            self.last = Some(direction);
        }
    }

    /// Effective direction at a specific tick.
    ///
    /// Uses binary search. `None` before the first recorded tick.
    pub fn intent_at(&self, tick: u32) -> Option<Direction> {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            None
        } else {
            Some(self.deltas[idx - 1].direction)
        }
    }

    /// All recorded deltas.
    pub fn deltas(&self) -> &[IntentDelta] {
        &self.deltas
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Digest of the recording, for round summaries.
    pub fn digest(&self) -> StateHash {
        let mut hasher = StateHasher::for_intent_log();
        hasher.update_u32(self.runner_id.0);
        hasher.update_u32(self.start_tick);
        hasher.update_u32(self.end_tick);
        hasher.update_u32(self.deltas.len() as u32);
        for delta in &self.deltas {
            hasher.update_u32(delta.tick);
            hasher.update_u8(delta.direction as u8);
        }
        hasher.finalize()
    }

    /// Create iterator over all recorded ticks for replay.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            log: self,
            current_tick: self.start_tick,
            delta_idx: 0,
            current: None,
        }
    }
}

/// Iterator replaying recorded intents tick-by-tick.
///
/// Yields `(tick, direction)` for every tick from `start_tick` through
/// `end_tick`; the direction is `None` until the first recorded change.
pub struct ReplayIterator<'a> {
    log: &'a IntentLog,
    current_tick: u32,
    delta_idx: usize,
    current: Option<Direction>,
}

impl Iterator for ReplayIterator<'_> {
    type Item = (u32, Option<Direction>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_tick > self.log.end_tick {
            return None;
        }

        while self.delta_idx < self.log.deltas.len() {
            let delta = &self.log.deltas[self.delta_idx];
            if delta.tick <= self.current_tick {
                self.current = Some(delta.direction);
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let result = (self.current_tick, self.current);
        self.current_tick += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_compression() {
        let mut log = IntentLog::new(RunnerId(0));

        log.record(0, Direction::Right);
        log.record(1, Direction::Right);
        log.record(2, Direction::Right);
        assert_eq!(log.delta_count(), 1);

        log.record(3, Direction::Up);
        assert_eq!(log.delta_count(), 2);
        assert_eq!(log.end_tick, 3);
    }

    #[test]
    fn test_intent_at_boundaries() {
        let mut log = IntentLog::new(RunnerId(0));
        log.record(10, Direction::Right);
        log.record(20, Direction::Down);

        assert_eq!(log.intent_at(5), None);
        assert_eq!(log.intent_at(10), Some(Direction::Right));
        assert_eq!(log.intent_at(15), Some(Direction::Right));
        assert_eq!(log.intent_at(20), Some(Direction::Down));
        assert_eq!(log.intent_at(100), Some(Direction::Down));
    }

    #[test]
    fn test_replay_iterator_holds_direction() {
        let mut log = IntentLog::new(RunnerId(0));
        log.record(0, Direction::Right);
        log.record(1, Direction::Right);
        log.record(2, Direction::Up);
        log.record(3, Direction::Up);
        log.record(4, Direction::Up);

        let replayed: Vec<_> = log.replay_iter().collect();
        assert_eq!(
            replayed,
            vec![
                (0, Some(Direction::Right)),
                (1, Some(Direction::Right)),
                (2, Some(Direction::Up)),
                (3, Some(Direction::Up)),
                (4, Some(Direction::Up)),
            ]
        );
    }

    #[test]
    fn test_replay_matches_intent_at() {
        let mut log = IntentLog::new(RunnerId(3));
        let script = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Up,
        ];
        for (tick, direction) in script.iter().enumerate() {
            log.record(tick as u32, *direction);
        }

        for (tick, direction) in log.replay_iter() {
            assert_eq!(direction, log.intent_at(tick));
        }
    }

    #[test]
    fn test_digest_tracks_content() {
        let mut a = IntentLog::new(RunnerId(0));
        let mut b = IntentLog::new(RunnerId(0));
        a.record(0, Direction::Right);
        b.record(0, Direction::Right);
        assert_eq!(a.digest(), b.digest());

        b.record(1, Direction::Up);
        assert_ne!(a.digest(), b.digest());
    }
}
