//! # Pellet Pursuit Engine
//!
//! Deterministic pursuit simulation on a square grid: runners steer by
//! intent and collect pellets while hunters replan A* paths toward the
//! nearest runner every tick. Designed so a finished round can be
//! verified by replaying its recorded intents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PELLET PURSUIT ENGINE                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── cell.rs     - Integral grid cells and directions        │
//! │  ├── vec2.rs     - Continuous 2D positions                   │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Round simulation (deterministic)          │
//! │  ├── grid.rs     - Open / wall / pellet occupancy            │
//! │  ├── search.rs   - A* pathfinding with reusable buffers      │
//! │  ├── state.rs    - Round, runner, and hunter state           │
//! │  ├── input.rs    - Intent recording and replay               │
//! │  ├── motion.rs   - Intent-driven and path-driven movement    │
//! │  ├── pursuit.rs  - Hunter targeting and replanning           │
//! │  ├── capture.rs  - Proximity capture detection               │
//! │  ├── tick.rs     - Authoritative simulation loop             │
//! │  └── events.rs   - Game events for replay/verification       │
//! │                                                              │
//! │  session.rs      - Round lifecycle, validation, replay       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time or randomness in simulation code
//! - Ties broken by fixed orderings (id order, insertion order)
//! - Positions are IEEE-754 `f64`, touched only by add, subtract,
//!   multiply, clamp, and round, which are exact operations on every
//!   conforming platform
//!
//! Given an identical starting state and intent sequence, the
//! simulation produces **identical results** on any platform, which is
//! what makes intent-log replay a verification tool.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use crate::core::cell::{Cell, Direction};
pub use crate::core::hash::StateHash;
pub use crate::core::vec2::Vec2;
pub use crate::game::grid::{CellState, Grid};
pub use crate::game::state::{HunterId, RoundState, RunnerId};
pub use crate::game::tick::{RoundConfig, TickResult};
pub use crate::session::{Session, SessionConfig, SessionError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
