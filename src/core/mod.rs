//! Core primitives shared across the engine.
//!
//! Grid coordinates and directions live in [`cell`], continuous
//! positions in [`vec2`], and the state hashing used for replay
//! verification in [`hash`].

pub mod cell;
pub mod hash;
pub mod vec2;

pub use cell::{Cell, Direction};
pub use hash::{compute_state_hash, StateHash, StateHasher};
pub use vec2::Vec2;
