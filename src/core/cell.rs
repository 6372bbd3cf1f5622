//! Integral Grid Cells and Cardinal Directions
//!
//! Discrete coordinates for pathfinding and grid indexing. Continuous
//! positions live in [`crate::core::vec2`]; the only way from one world to
//! the other is [`crate::core::vec2::Vec2::snap`].

use std::fmt;
use serde::{Serialize, Deserialize};

/// A cell on the grid, addressed column-first.
///
/// Signed components so that out-of-bounds cells (which the grid answers
/// "wall" for) stay representable. Implements `Ord` for deterministic
/// ordering in sorted containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Column index (grows rightward)
    pub x: i32,
    /// Row index (grows downward)
    pub y: i32,
}

impl Cell {
    /// Create a cell from raw coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    ///
    /// This is the A* heuristic: admissible and consistent for
    /// 4-directional unit-cost movement.
    #[inline]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The adjacent cell one step in `direction`.
    #[inline]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four axis-aligned neighbors in fixed N, E, S, W order.
    ///
    /// The order is part of the engine's determinism contract: combined
    /// with the frontier's insertion-order tie-break it pins down which of
    /// several equally short paths the search returns.
    #[inline]
    pub fn neighbors(self) -> [Cell; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement direction for runner intents.
///
/// Screen-style axes: `Up` decreases `y`, `Down` increases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward smaller `y`
    Up = 0,
    /// Toward larger `y`
    Down = 1,
    /// Toward smaller `x`
    Left = 2,
    /// Toward larger `x`
    Right = 3,
}

impl Direction {
    /// All directions, in discriminant order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit cell offset for this direction.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Cell::new(1, 1);
        let b = Cell::new(4, 5);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(b.manhattan_distance(a), 7);
        assert_eq!(a.manhattan_distance(a), 0);

        // Signed coordinates.
        assert_eq!(Cell::new(-2, 0).manhattan_distance(Cell::new(2, 0)), 4);
    }

    #[test]
    fn test_step_matches_delta() {
        let origin = Cell::new(5, 5);
        assert_eq!(origin.step(Direction::Up), Cell::new(5, 4));
        assert_eq!(origin.step(Direction::Down), Cell::new(5, 6));
        assert_eq!(origin.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(origin.step(Direction::Right), Cell::new(6, 5));
    }

    #[test]
    fn test_neighbors_order_is_stable() {
        let c = Cell::new(3, 3);
        assert_eq!(
            c.neighbors(),
            [
                Cell::new(3, 2),
                Cell::new(4, 3),
                Cell::new(3, 4),
                Cell::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_neighbors_are_all_adjacent() {
        let c = Cell::new(0, 0);
        for n in c.neighbors() {
            assert_eq!(c.manhattan_distance(n), 1);
        }
    }

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
