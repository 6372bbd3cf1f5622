//! Occupancy Grid
//!
//! Square cell matrix backing pathfinding and motion checks. The border
//! ring is always wall, and out-of-range queries answer "wall", so
//! callers can probe any coordinate without a bounds check of their own.

use serde::{Deserialize, Serialize};

use crate::core::cell::Cell;

/// Points granted per collected pellet unless configured otherwise.
pub const DEFAULT_PELLET_REWARD: u32 = 10;

/// Occupancy of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Traversable, nothing to collect
    Open = 0,
    /// Impassable
    Wall = 1,
    /// Traversable, holds an uncollected pellet
    Pellet = 2,
}

/// Square occupancy map, stored row-major.
///
/// Dimensions are fixed at construction; after layout the only mutation
/// during play is pellet collection (Pellet -> Open).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grid {
    size: u32,
    pellet_reward: u32,
    pellet_count: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Builds a `size` x `size` grid with a wall border and open interior.
    ///
    /// Sizes below 3 have no interior and come out all-wall; they are
    /// well-defined here and rejected at the session boundary.
    pub fn new(size: u32) -> Self {
        Self::with_reward(size, DEFAULT_PELLET_REWARD)
    }

    pub fn with_reward(size: u32, pellet_reward: u32) -> Self {
        let side = size as usize;
        let mut cells = vec![CellState::Open; side.saturating_mul(side)];
        for y in 0..side {
            for x in 0..side {
                if x == 0 || y == 0 || x == side - 1 || y == side - 1 {
                    cells[y * side + x] = CellState::Wall;
                }
            }
        }
        Self {
            size,
            pellet_reward,
            pellet_count: 0,
            cells,
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn pellet_reward(&self) -> u32 {
        self.pellet_reward
    }

    #[inline]
    pub fn pellets_remaining(&self) -> u32 {
        self.pellet_count
    }

    /// Row-major cell states, for renderers and state hashing.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        let side = self.size as i32;
        if cell.x < 0 || cell.y < 0 || cell.x >= side || cell.y >= side {
            return None;
        }
        Some(cell.y as usize * self.size as usize + cell.x as usize)
    }

    /// State at `cell`; any out-of-range coordinate reads as wall.
    #[inline]
    pub fn state(&self, cell: Cell) -> CellState {
        match self.index(cell) {
            Some(idx) => self.cells[idx],
            None => CellState::Wall,
        }
    }

    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.state(cell) == CellState::Wall
    }

    /// Collects the pellet at `cell`, opening the cell.
    ///
    /// Returns the pellet reward, or 0 when the cell holds no pellet.
    /// Collecting the same cell twice pays once.
    pub fn collect(&mut self, cell: Cell) -> u32 {
        let Some(idx) = self.index(cell) else {
            return 0;
        };
        if self.cells[idx] != CellState::Pellet {
            return 0;
        }
        self.cells[idx] = CellState::Open;
        self.pellet_count -= 1;
        self.pellet_reward
    }

    /// Turns an in-range cell into a wall. A pellet occupying the cell is
    /// removed with it.
    pub fn set_wall(&mut self, cell: Cell) {
        if let Some(idx) = self.index(cell) {
            if self.cells[idx] == CellState::Pellet {
                self.pellet_count -= 1;
            }
            self.cells[idx] = CellState::Wall;
        }
    }

    /// Places a pellet on an open cell. Returns false for walls, cells
    /// already holding a pellet, and out-of-range coordinates.
    pub fn place_pellet(&mut self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(idx) if self.cells[idx] == CellState::Open => {
                self.cells[idx] = CellState::Pellet;
                self.pellet_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Drops a pellet on every open cell. Returns how many were placed.
    pub fn fill_pellets(&mut self) -> u32 {
        let mut placed = 0;
        for state in &mut self.cells {
            if *state == CellState::Open {
                *state = CellState::Pellet;
                placed += 1;
            }
        }
        self.pellet_count += placed;
        placed
    }
}
