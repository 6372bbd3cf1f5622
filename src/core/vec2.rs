//! Continuous 2D Position
//!
//! Agent positions are real-valued grid coordinates: a position of
//! `(2.0, 3.0)` is the center of cell `(2, 3)`, and agents spend most ticks
//! between cell centers. Every conversion back to the integral grid goes
//! through [`Vec2::snap`], the crate's single rounding rule.

use std::fmt;
use std::ops::{Add, Sub, Neg};
use serde::{Serialize, Deserialize};

use super::cell::Cell;

/// 2D position in continuous grid coordinates.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X coordinate (column axis)
    pub x: f64,
    /// Y coordinate (row axis)
    pub y: f64,
}

impl Vec2 {
    /// Origin position
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a position from raw coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The center of an integral grid cell.
    #[inline]
    pub fn from_cell(cell: Cell) -> Self {
        Self {
            x: cell.x as f64,
            y: cell.y as f64,
        }
    }

    /// Snap to the nearest integral cell.
    ///
    /// Round-to-nearest per axis, ties away from zero (`f64::round`).
    /// This is the only continuous-to-integral conversion in the engine;
    /// grid indexing, pathfinding endpoints, and move validation all derive
    /// from it, so there is exactly one rounding rule to reason about.
    #[inline]
    pub fn snap(self) -> Cell {
        Cell {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }

    /// Squared Euclidean distance to another position.
    ///
    /// Prefer this for threshold comparisons; it avoids the square root.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another position.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Manhattan distance to another position.
    ///
    /// Target selection ranks runners by this metric on raw continuous
    /// coordinates, before any snapping.
    #[inline]
    pub fn manhattan_distance(self, other: Self) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Scale both components.
    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// True when both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Cell> for Vec2 {
    #[inline]
    fn from(cell: Cell) -> Self {
        Self::from_cell(cell)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================
