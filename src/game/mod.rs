//! Game Logic Module
//!
//! All round simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `grid`: Square arena of open, wall, and pellet cells
//! - `search`: A* pathfinding over the grid
//! - `state`: Round state, runners, hunters
//! - `input`: Runner intent recording and replay
//! - `motion`: Intent-driven and path-driven movement
//! - `pursuit`: Hunter target selection and replanning
//! - `capture`: Proximity capture detection
//! - `tick`: Authoritative simulation loop
//! - `events`: Game events for replay/verification

pub mod capture;
pub mod events;
pub mod grid;
pub mod input;
pub mod motion;
pub mod pursuit;
pub mod search;
pub mod state;
pub mod tick;

// Re-export key types
pub use events::{GameEvent, GameEventData};
pub use grid::{CellState, Grid};
pub use input::{IntentDelta, IntentLog};
pub use search::PathFinder;
pub use state::{HunterId, HunterState, RoundPhase, RoundState, RunnerId, RunnerState};
pub use tick::{RoundConfig, TickResult};
