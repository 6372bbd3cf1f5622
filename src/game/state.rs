//! Round State Definitions
//!
//! All state types for round simulation.
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::cell::{Cell, Direction};
use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::core::vec2::Vec2;
use crate::game::events::GameEvent;
use crate::game::grid::Grid;
use crate::game::search::PathFinder;

// =============================================================================
// AGENT IDS
// =============================================================================

/// Unique runner identifier, chosen by the caller.
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct RunnerId(pub u32);

/// Unique hunter identifier, assigned from a monotonic counter.
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct HunterId(pub u32);

// =============================================================================
// RUNNER STATE
// =============================================================================

/// State of a single runner in the round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunnerState {
    /// Unique runner ID
    pub id: RunnerId,

    /// Continuous position, in grid coordinates
    pub position: Vec2,

    /// Persistent movement intent; holds until replaced
    pub direction: Direction,

    /// Cells advanced per tick
    pub speed: f64,

    /// Accumulated score
    pub score: u32,

    /// Pellets collected so far
    pub pellets_collected: u32,
}

impl RunnerState {
    /// Create a new runner at a spawn cell.
    pub fn new(id: RunnerId, spawn: Cell, speed: f64) -> Self {
        Self {
            id,
            position: Vec2::from_cell(spawn),
            direction: Direction::Right,
            speed,
            score: 0,
            pellets_collected: 0,
        }
    }

    /// Grid cell this runner currently occupies.
    #[inline]
    pub fn cell(&self) -> Cell {
        self.position.snap()
    }

    /// Add score from a collected pellet.
    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
        self.pellets_collected += 1;
    }

    /// Hash this runner's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id.0);
        hasher.update_vec2(self.position);
        hasher.update_u8(self.direction as u8);
        hasher.update_f64(self.speed);
        hasher.update_u32(self.score);
        hasher.update_u32(self.pellets_collected);
    }
}

// =============================================================================
// HUNTER STATE
// =============================================================================

/// State of a single hunter in the round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HunterState {
    /// Unique hunter ID
    pub id: HunterId,

    /// Continuous position, in grid coordinates
    pub position: Vec2,

    /// Cells advanced per tick, per axis
    pub speed: f64,

    /// Remaining waypoints toward the chased runner, head first.
    /// Replaced wholesale on every pursuit refresh.
    pub path: Vec<Cell>,
}

impl HunterState {
    /// Create a new hunter at a spawn cell.
    pub fn new(id: HunterId, spawn: Cell, speed: f64) -> Self {
        Self {
            id,
            position: Vec2::from_cell(spawn),
            speed,
            path: Vec::new(),
        }
    }

    /// Grid cell this hunter currently occupies.
    #[inline]
    pub fn cell(&self) -> Cell {
        self.position.snap()
    }

    /// Hash this hunter's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id.0);
        hasher.update_vec2(self.position);
        hasher.update_f64(self.speed);
        hasher.update_u32(self.path.len() as u32);
        for cell in &self.path {
            hasher.update_cell(*cell);
        }
    }
}

// =============================================================================
// ROUND PHASE
// =============================================================================

/// Current phase of the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum RoundPhase {
    /// Active gameplay
    #[default]
    Playing = 0,
    /// Round ended by a capture
    Ended = 1,
}

// =============================================================================
// ROUND STATE
// =============================================================================

/// Complete state of a round.
///
/// Uses BTreeMap for deterministic iteration order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundState {
    /// Current tick
    pub tick: u32,

    /// Current round phase
    pub phase: RoundPhase,

    /// Occupancy grid
    pub grid: Grid,

    /// All runners (BTreeMap for deterministic iteration)
    pub runners: BTreeMap<RunnerId, RunnerState>,

    /// All hunters (BTreeMap for deterministic iteration)
    pub hunters: BTreeMap<HunterId, HunterState>,

    /// Next hunter ID (monotonic counter)
    pub next_hunter_id: u32,

    /// Runner whose capture ended the round
    pub captured: Option<RunnerId>,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,

    /// Reusable search buffers; scratch space, not observable state
    #[serde(skip)]
    pub planner: PathFinder,
}

impl RoundState {
    /// Create a new round over a laid-out grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            tick: 0,
            phase: RoundPhase::Playing,
            grid,
            runners: BTreeMap::new(),
            hunters: BTreeMap::new(),
            next_hunter_id: 0,
            captured: None,
            pending_events: Vec::new(),
            planner: PathFinder::new(),
        }
    }

    /// Add a runner at a spawn cell.
    ///
    /// Spawn validity and id uniqueness are checked at the session
    /// boundary; this inserts unconditionally.
    pub fn add_runner(&mut self, id: RunnerId, spawn: Cell, speed: f64) {
        self.runners.insert(id, RunnerState::new(id, spawn, speed));
    }

    /// Add a hunter at a spawn cell, assigning the next id.
    pub fn add_hunter(&mut self, spawn: Cell, speed: f64) -> HunterId {
        let id = HunterId(self.next_hunter_id);
        self.next_hunter_id += 1;
        self.hunters.insert(id, HunterState::new(id, spawn, speed));
        id
    }

    /// Get a runner by ID.
    pub fn get_runner(&self, id: RunnerId) -> Option<&RunnerState> {
        self.runners.get(&id)
    }

    /// Get a runner mutably by ID.
    pub fn get_runner_mut(&mut self, id: RunnerId) -> Option<&mut RunnerState> {
        self.runners.get_mut(&id)
    }

    /// Get a hunter by ID.
    pub fn get_hunter(&self, id: HunterId) -> Option<&HunterState> {
        self.hunters.get(&id)
    }

    /// Check if the round has ended.
    pub fn is_ended(&self) -> bool {
        matches!(self.phase, RoundPhase::Ended)
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            hasher.update_u8(self.phase as u8);

            // Grid occupancy, row-major
            hasher.update_u32(self.grid.size());
            for state in self.grid.cells() {
                hasher.update_u8(*state as u8);
            }

            // Agents in sorted order (BTreeMap guarantees this)
            for runner in self.runners.values() {
                runner.hash_into(hasher);
            }
            for hunter in self.hunters.values() {
                hunter.hash_into(hasher);
            }

            match self.captured {
                Some(id) => {
                    hasher.update_bool(true);
                    hasher.update_u32(id.0);
                }
                None => hasher.update_bool(false),
            }
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
