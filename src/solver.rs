/*
solver.rs

Copyright 2025 The Mazebench Authors

This file is part of Mazebench.

Mazebench is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazebench is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazebench. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Breadth-first shortest-path and reachability solver.
//!
//! The generators call [`solve`] to accept or reject candidate mazes, and
//! the validator uses the same routine to compute efficiency. A single BFS
//! traversal yields both the shortest path to the goal and the number of
//! cells reachable from the start.

use log::debug;
use std::collections::{HashSet, VecDeque};

use crate::grid::{Direction, Grid, Position};

/// A maze whose optimal route explores less than this share of the
/// reachable cells is too open to be interesting and should be regenerated.
const MIN_PATH_RATIO: f64 = 0.15;

/// Result of a [`solve`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Number of moves on the shortest path from start to goal, or `-1`
    /// when the goal is unreachable.
    pub shortest_path: i32,

    /// Number of cells reachable from the start, including the start cell.
    pub total_reachable: usize,

    /// `shortest_path / total_reachable`; `0.0` when unreachable.
    pub ratio: f64,

    /// Whether the maze is unsolvable or too open ("boring") and should be
    /// regenerated.
    pub would_regenerate: bool,
}

/// Compute the shortest path from `start` to `goal` and the number of cells
/// reachable from `start`.
///
/// # Panics
///
/// Out-of-bounds start or goal positions are programmer errors and panic.
pub fn solve(grid: &Grid, start: Position, goal: Position) -> SolveReport {
    solve_with_obstacles(grid, start, goal, &HashSet::new())
}

/// Like [`solve`], but the cells in `obstacles` are impassable regardless
/// of the wall layout.
pub fn solve_with_obstacles(
    grid: &Grid,
    start: Position,
    goal: Position,
    obstacles: &HashSet<Position>,
) -> SolveReport {
    assert!(grid.contains(start), "start position out of bounds");
    assert!(grid.contains(goal), "goal position out of bounds");

    let mut visited = vec![vec![false; grid.width()]; grid.height()];
    let mut queue: VecDeque<(Position, usize)> = VecDeque::new();
    let mut shortest_path: i32 = -1;
    let mut total_reachable: usize = 0;

    if !obstacles.contains(&start) {
        visited[start.y][start.x] = true;
        queue.push_back((start, 0));
    }

    while let Some((pos, depth)) = queue.pop_front() {
        total_reachable += 1;
        if pos == goal && shortest_path < 0 {
            shortest_path = depth as i32;
        }
        for direction in Direction::ALL {
            if !grid.can_move(pos, direction) {
                continue;
            }
            // can_move already checked the bounds
            let next: Position = grid.neighbor(pos, direction).unwrap();
            if visited[next.y][next.x] || obstacles.contains(&next) {
                continue;
            }
            visited[next.y][next.x] = true;
            queue.push_back((next, depth + 1));
        }
    }

    let ratio: f64 = if shortest_path > 0 && total_reachable > 0 {
        f64::from(shortest_path) / total_reachable as f64
    } else {
        0.0
    };
    let would_regenerate: bool = shortest_path <= 0 || ratio < MIN_PATH_RATIO;
    debug!(
        "solve: shortest_path = {shortest_path}  reachable = {total_reachable}  \
         ratio = {ratio:.3}  would_regenerate = {would_regenerate}"
    );

    SolveReport {
        shortest_path,
        total_reachable,
        ratio,
        would_regenerate,
    }
}
