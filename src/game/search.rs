//! Shortest-Path Search
//!
//! Grid A* with a Manhattan heuristic. The frontier, cost, and
//! predecessor buffers live in a reusable [`PathFinder`] so the per-tick
//! searches settle into zero allocation once warm.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::cell::Cell;
use crate::game::grid::Grid;

/// Frontier entry. The ordering key is `(f, seq)`: lowest estimated
/// total cost first, and equal-cost entries pop in insertion order.
#[derive(Clone, Debug)]
struct OpenNode {
    f: u32,
    g: u32,
    cell: Cell,
    seq: u64,
}

impl OpenNode {
    fn key(&self) -> (u32, u64) {
        (self.f, self.seq)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// Reusable A* searcher.
///
/// Buffers are cleared and resized per call, so one value serves grids
/// of any size. A warm searcher and a fresh one produce identical paths
/// for identical inputs.
#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    frontier: BinaryHeap<OpenNode>,
    g_score: Vec<u32>,
    came_from: Vec<Option<usize>>,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest path from `start` to `goal`, excluding `start` and
    /// including `goal`.
    ///
    /// Empty when `goal == start` or when no route exists. "No route"
    /// covers walled-off regions, wall endpoints, and out-of-range
    /// endpoints; none of these are errors.
    pub fn find_path(&mut self, grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
        let mut path = Vec::new();
        self.find_path_into(grid, start, goal, &mut path);
        path
    }

    /// [`find_path`](Self::find_path) writing into a caller-owned
    /// vector, reusing its allocation.
    pub fn find_path_into(&mut self, grid: &Grid, start: Cell, goal: Cell, out: &mut Vec<Cell>) {
        out.clear();
        if start == goal || grid.is_wall(start) || grid.is_wall(goal) {
            return;
        }

        let side = grid.size() as usize;
        self.frontier.clear();
        self.g_score.clear();
        self.g_score.resize(side * side, u32::MAX);
        self.came_from.clear();
        self.came_from.resize(side * side, None);

        let start_idx = cell_index(side, start);
        let goal_idx = cell_index(side, goal);
        let mut seq: u64 = 0;

        self.g_score[start_idx] = 0;
        self.frontier.push(OpenNode {
            f: start.manhattan_distance(goal),
            g: 0,
            cell: start,
            seq,
        });
        seq += 1;

        while let Some(node) = self.frontier.pop() {
            if node.cell == goal {
                self.reconstruct(side, start_idx, goal_idx, out);
                return;
            }

            let node_idx = cell_index(side, node.cell);
            if node.g != self.g_score[node_idx] {
                // Stale heap entry.
                continue;
            }

            for neighbor in node.cell.neighbors() {
                if grid.is_wall(neighbor) {
                    continue;
                }
                let neighbor_idx = cell_index(side, neighbor);
                let tentative_g = node.g.saturating_add(1);
                if tentative_g >= self.g_score[neighbor_idx] {
                    continue;
                }

                self.came_from[neighbor_idx] = Some(node_idx);
                self.g_score[neighbor_idx] = tentative_g;
                self.frontier.push(OpenNode {
                    f: tentative_g.saturating_add(neighbor.manhattan_distance(goal)),
                    g: tentative_g,
                    cell: neighbor,
                    seq,
                });
                seq += 1;
            }
        }

        // Frontier exhausted without popping the goal: no route.
    }

    fn reconstruct(&self, side: usize, start_idx: usize, goal_idx: usize, out: &mut Vec<Cell>) {
        let mut cursor = goal_idx;
        while cursor != start_idx {
            out.push(cell_from_index(side, cursor));
            let Some(prev) = self.came_from[cursor] else {
                out.clear();
                return;
            };
            cursor = prev;
        }
        out.reverse();
    }
}

#[inline]
fn cell_index(side: usize, cell: Cell) -> usize {
    cell.y as usize * side + cell.x as usize
}

#[inline]
fn cell_from_index(side: usize, idx: usize) -> Cell {
    Cell::new((idx % side) as i32, (idx / side) as i32)
}
