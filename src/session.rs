//! Round Session Management
//!
//! Owns a round from configuration through live play to replay
//! verification. All validation happens here at the boundary: once a
//! round is running the simulation never fails, it only produces
//! outcomes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::cell::{Cell, Direction};
use crate::core::hash::StateHash;
use crate::game::events::GameEvent;
use crate::game::grid::Grid;
use crate::game::input::IntentLog;
use crate::game::state::{HunterId, RoundState, RunnerId};
use crate::game::tick::{replay_round, tick, RoundConfig, TickResult};

/// Configuration for a round session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Grid side length in cells.
    pub grid_size: u32,
    /// Euclidean distance below which a hunter captures a runner.
    pub capture_threshold: f64,
    /// Per-axis distance at which a hunter locks onto its waypoint.
    pub arrival_tolerance: f64,
    /// Points per collected pellet.
    pub pellet_reward: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            capture_threshold: 0.5,
            arrival_tolerance: 0.1,
            pellet_reward: 10,
        }
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<(), SessionError> {
        if self.grid_size < 3 {
            return Err(SessionError::GridTooSmall {
                size: self.grid_size,
            });
        }
        if !self.capture_threshold.is_finite() || self.capture_threshold <= 0.0 {
            return Err(SessionError::ThresholdOutOfRange {
                threshold: self.capture_threshold,
            });
        }
        // At 0.5 and above a hunter would lock onto a waypoint while
        // snapping to a different cell.
        if !self.arrival_tolerance.is_finite()
            || self.arrival_tolerance <= 0.0
            || self.arrival_tolerance >= 0.5
        {
            return Err(SessionError::ToleranceOutOfRange {
                tolerance: self.arrival_tolerance,
            });
        }
        Ok(())
    }
}

/// A round session.
///
/// Wraps the deterministic simulation with identity, boundary
/// validation, intent recording, and replay verification. Roster and
/// grid layout are fixed once the first tick runs.
pub struct Session {
    /// Unique round identifier.
    pub round_id: Uuid,
    /// Session configuration.
    pub config: SessionConfig,
    /// Live round state.
    state: RoundState,
    /// Tick-level parameters derived from `config`.
    round_config: RoundConfig,
    /// Snapshot taken at the first advance, for replay.
    initial_state: Option<Box<RoundState>>,
    /// Per-runner intent recordings.
    logs: BTreeMap<RunnerId, IntentLog>,
    /// Intents staged for the next tick.
    queued: BTreeMap<RunnerId, Direction>,
    /// When the first tick ran.
    started_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a session from a validated configuration.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let grid = Grid::with_reward(config.grid_size, config.pellet_reward);
        let round_config = RoundConfig {
            capture_threshold: config.capture_threshold,
            arrival_tolerance: config.arrival_tolerance,
        };
        let round_id = Uuid::new_v4();

        debug!(
            "Created round {} on a {}x{} grid",
            round_id, config.grid_size, config.grid_size
        );

        Ok(Self {
            round_id,
            config,
            state: RoundState::new(grid),
            round_config,
            initial_state: None,
            logs: BTreeMap::new(),
            queued: BTreeMap::new(),
            started_at: None,
        })
    }

    // ===== ROSTER AND LAYOUT (before the first tick) =====

    fn ensure_not_started(&self) -> Result<(), SessionError> {
        if self.started_at.is_some() {
            return Err(SessionError::RoundStarted);
        }
        Ok(())
    }

    fn validate_speed(speed: f64) -> Result<(), SessionError> {
        // Above 1.0 an agent could cross a wall cell between two snaps.
        if !speed.is_finite() || speed <= 0.0 || speed > 1.0 {
            return Err(SessionError::SpeedOutOfRange { speed });
        }
        Ok(())
    }

    fn validate_spawn(&self, cell: Cell) -> Result<(), SessionError> {
        if self.state.grid.is_wall(cell) {
            return Err(SessionError::SpawnBlocked { cell });
        }
        Ok(())
    }

    /// Add a runner to the round.
    pub fn add_runner(
        &mut self,
        runner_id: RunnerId,
        spawn: Cell,
        speed: f64,
    ) -> Result<(), SessionError> {
        self.ensure_not_started()?;
        Self::validate_speed(speed)?;
        self.validate_spawn(spawn)?;
        if self.state.runners.contains_key(&runner_id) {
            return Err(SessionError::DuplicateRunner { runner_id });
        }

        self.state.add_runner(runner_id, spawn, speed);
        self.logs.insert(runner_id, IntentLog::new(runner_id));
        debug!("Runner {} joins round {} at {}", runner_id.0, self.round_id, spawn);
        Ok(())
    }

    /// Add a hunter to the round.
    pub fn add_hunter(&mut self, spawn: Cell, speed: f64) -> Result<HunterId, SessionError> {
        self.ensure_not_started()?;
        Self::validate_speed(speed)?;
        self.validate_spawn(spawn)?;

        let hunter_id = self.state.add_hunter(spawn, speed);
        debug!("Hunter {} joins round {} at {}", hunter_id.0, self.round_id, spawn);
        Ok(hunter_id)
    }

    /// Turn a cell into a wall.
    pub fn set_wall(&mut self, cell: Cell) -> Result<(), SessionError> {
        self.ensure_not_started()?;
        self.state.grid.set_wall(cell);
        Ok(())
    }

    /// Place a pellet on an open cell. Returns whether it was placed.
    pub fn place_pellet(&mut self, cell: Cell) -> Result<bool, SessionError> {
        self.ensure_not_started()?;
        Ok(self.state.grid.place_pellet(cell))
    }

    /// Put a pellet on every open interior cell. Returns how many were placed.
    pub fn fill_pellets(&mut self) -> Result<u32, SessionError> {
        self.ensure_not_started()?;
        Ok(self.state.grid.fill_pellets())
    }

    // ===== LIVE PLAY =====

    /// Stage a runner's movement intent for the next tick.
    ///
    /// The latest intent before an advance wins; without one the runner
    /// keeps its current direction.
    pub fn set_intent(
        &mut self,
        runner_id: RunnerId,
        direction: Direction,
    ) -> Result<(), SessionError> {
        if self.state.is_ended() {
            return Err(SessionError::RoundOver);
        }
        if !self.state.runners.contains_key(&runner_id) {
            return Err(SessionError::UnknownRunner { runner_id });
        }
        self.queued.insert(runner_id, direction);
        Ok(())
    }

    /// Run one simulation tick.
    ///
    /// The first advance snapshots the state and locks roster and
    /// layout. Every runner's effective direction is recorded before
    /// the tick, so a replay feeds identical values through the same
    /// path.
    pub fn advance(&mut self) -> Result<TickResult, SessionError> {
        if self.state.is_ended() {
            return Err(SessionError::RoundOver);
        }

        if self.started_at.is_none() {
            self.start();
        }

        let tick_now = self.state.tick;
        let mut intents = BTreeMap::new();
        for (runner_id, runner) in &self.state.runners {
            let direction = self
                .queued
                .get(runner_id)
                .copied()
                .unwrap_or(runner.direction);
            if let Some(log) = self.logs.get_mut(runner_id) {
                log.record(tick_now, direction);
            }
            intents.insert(*runner_id, direction);
        }
        self.queued.clear();

        let result = tick(&mut self.state, &intents, &self.round_config);

        if let Some(runner_id) = result.captured {
            info!(
                "Round {} over: runner {} captured at tick {}",
                self.round_id, runner_id.0, self.state.tick
            );
        }

        Ok(result)
    }

    /// Advance until the round ends or `max_ticks` more ticks have run.
    ///
    /// Returns all events generated. An already ended round yields none.
    pub fn advance_until_ended(&mut self, max_ticks: u32) -> Result<Vec<GameEvent>, SessionError> {
        let mut events = Vec::new();
        for _ in 0..max_ticks {
            if self.state.is_ended() {
                break;
            }
            let result = self.advance()?;
            events.extend(result.events);
        }
        Ok(events)
    }

    fn start(&mut self) {
        self.started_at = Some(Utc::now());
        self.initial_state = Some(Box::new(self.state.clone()));
        info!(
            "Round {} started: {} runners, {} hunters, {} pellets",
            self.round_id,
            self.state.runners.len(),
            self.state.hunters.len(),
            self.state.grid.pellets_remaining()
        );
    }

    // ===== VERIFICATION AND REPORTING =====

    /// Re-simulate from the starting snapshot and recorded intents,
    /// and compare against the live state.
    pub fn verify_replay(&self) -> Result<ReplayOutcome, SessionError> {
        let initial = self
            .initial_state
            .as_deref()
            .ok_or(SessionError::RoundNotStarted)?;

        let ticks = self.state.tick;
        let (replayed, events) =
            replay_round(initial.clone(), &self.logs, ticks, &self.round_config);

        Ok(ReplayOutcome {
            ticks,
            live_hash: self.state.compute_hash(),
            replayed_hash: replayed.compute_hash(),
            events,
        })
    }

    /// Summarize the round for reporting.
    pub fn summary(&self) -> RoundSummary {
        let mut runners: Vec<RunnerSummary> = self
            .state
            .runners
            .values()
            .map(|runner| RunnerSummary {
                runner_id: runner.id,
                place: 0, // Set below
                score: runner.score,
                pellets_collected: runner.pellets_collected,
                captured: self.state.captured == Some(runner.id),
                intent_digest: self.logs.get(&runner.id).map(|log| hex::encode(log.digest())),
            })
            .collect();

        // Sort by score descending; stable, so ties keep id order
        runners.sort_by(|a, b| b.score.cmp(&a.score));
        for (i, runner) in runners.iter_mut().enumerate() {
            runner.place = (i + 1) as u8;
        }

        RoundSummary {
            round_id: self.round_id,
            started_at: self.started_at,
            ticks: self.state.tick,
            captured: self.state.captured,
            pellets_remaining: self.state.grid.pellets_remaining(),
            runners,
            final_state_hash: hex::encode(self.state.compute_hash()),
        }
    }

    // ===== ACCESSORS =====

    /// Live round state.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Current tick.
    pub fn current_tick(&self) -> u32 {
        self.state.tick
    }

    /// Whether the first tick has run.
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Whether a capture has ended the round.
    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    /// Recorded intent logs, by runner.
    pub fn intent_logs(&self) -> &BTreeMap<RunnerId, IntentLog> {
        &self.logs
    }
}

/// Result of replaying a round against its live state.
#[derive(Debug)]
pub struct ReplayOutcome {
    /// Ticks replayed.
    pub ticks: u32,
    /// Hash of the live state.
    pub live_hash: StateHash,
    /// Hash of the replayed state.
    pub replayed_hash: StateHash,
    /// Events regenerated by the replay.
    pub events: Vec<GameEvent>,
}

impl ReplayOutcome {
    /// True when the replay reproduced the live state exactly.
    pub fn verified(&self) -> bool {
        self.live_hash == self.replayed_hash
    }
}

/// Per-runner line in a round summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSummary {
    /// Runner identifier.
    pub runner_id: RunnerId,
    /// Placement by score, 1 = highest.
    pub place: u8,
    /// Final score.
    pub score: u32,
    /// Pellets collected.
    pub pellets_collected: u32,
    /// Whether this runner's capture ended the round.
    pub captured: bool,
    /// Hex digest of the recorded intent log.
    pub intent_digest: Option<String>,
}

/// Round summary for reporting and archival.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Round identifier.
    pub round_id: Uuid,
    /// When the first tick ran.
    pub started_at: Option<DateTime<Utc>>,
    /// Ticks simulated.
    pub ticks: u32,
    /// Runner whose capture ended the round.
    pub captured: Option<RunnerId>,
    /// Pellets still on the grid.
    pub pellets_remaining: u32,
    /// Runner results, best score first.
    pub runners: Vec<RunnerSummary>,
    /// Hex hash of the final state.
    pub final_state_hash: String,
}

/// Session errors. The only failures the engine reports; everything
/// after construction is a silent domain outcome.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// Grid has no open interior.
    #[error("Grid size {size} leaves no open interior (minimum 3)")]
    GridTooSmall {
        /// Rejected side length.
        size: u32,
    },

    /// Capture threshold must be finite and positive.
    #[error("Capture threshold {threshold} is not finite and positive")]
    ThresholdOutOfRange {
        /// Rejected threshold.
        threshold: f64,
    },

    /// Arrival tolerance must be finite, positive, and below 0.5.
    #[error("Arrival tolerance {tolerance} is outside (0, 0.5)")]
    ToleranceOutOfRange {
        /// Rejected tolerance.
        tolerance: f64,
    },

    /// Agent speed must be finite and within (0, 1].
    #[error("Speed {speed} is outside (0, 1]")]
    SpeedOutOfRange {
        /// Rejected speed.
        speed: f64,
    },

    /// Spawn cell is a wall or out of bounds.
    #[error("Spawn cell {cell} is blocked")]
    SpawnBlocked {
        /// Rejected spawn cell.
        cell: Cell,
    },

    /// Runner id already registered.
    #[error("Runner {} already in round", runner_id.0)]
    DuplicateRunner {
        /// Conflicting id.
        runner_id: RunnerId,
    },

    /// Runner id not registered.
    #[error("Runner {} not in round", runner_id.0)]
    UnknownRunner {
        /// Unrecognized id.
        runner_id: RunnerId,
    },

    /// Roster and layout are locked after the first tick.
    #[error("Round already started")]
    RoundStarted,

    /// Replay needs at least one completed tick.
    #[error("Round has not started")]
    RoundNotStarted,

    /// Round already ended by a capture.
    #[error("Round is over")]
    RoundOver,
}

// =============================================================================
// TESTS
// =============================================================================
