//! Game Events
//!
//! Events generated during simulation, surfaced through `TickResult`
//! for front ends and round summaries.

use serde::{Deserialize, Serialize};

use crate::core::cell::Cell;
use crate::game::state::{HunterId, RunnerId};

/// Game event data.
///
/// Events within a tick arrive in phase order: runner motion first,
/// then capture, so no extra priority field is needed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Runner collected a pellet
    PelletCollected {
        runner_id: RunnerId,
        cell: Cell,
        points: u32,
        new_score: u32,
    },

    /// Hunter caught a runner
    RunnerCaptured {
        runner_id: RunnerId,
        hunter_id: HunterId,
    },

    /// Round ended
    RoundEnded {
        captured: RunnerId,
        duration_ticks: u32,
    },
}

/// A game event stamped with the tick it occurred on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create pellet collected event.
    pub fn pellet_collected(
        tick: u32,
        runner_id: RunnerId,
        cell: Cell,
        points: u32,
        new_score: u32,
    ) -> Self {
        Self::new(
            tick,
            GameEventData::PelletCollected {
                runner_id,
                cell,
                points,
                new_score,
            },
        )
    }

    /// Create runner captured event.
    pub fn runner_captured(tick: u32, runner_id: RunnerId, hunter_id: HunterId) -> Self {
        Self::new(
            tick,
            GameEventData::RunnerCaptured {
                runner_id,
                hunter_id,
            },
        )
    }

    /// Create round ended event.
    pub fn round_ended(tick: u32, captured: RunnerId) -> Self {
        Self::new(
            tick,
            GameEventData::RoundEnded {
                captured,
                duration_ticks: tick,
            },
        )
    }
}
