/*
maze.rs

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

//! Accepted generation output.
//!
//! A [`GeneratedMaze`] is produced once by a generator and never mutated
//! afterwards. Its `shortest_path` is always the solver's answer for the
//! final grid, never a guess. The optional [`PathConstraints`] payload asks
//! the agent for more than goal arrival: either following one of several
//! move/position subsequences in order, or visiting a set of tiles in any
//! order.

use serde::{Deserialize, Serialize};

use crate::generator::profile::Difficulty;
use crate::grid::{Direction, Grid, Position};

/// One step of an ordered-subsequence constraint: either a move the agent
/// must make or a tile it must stand on, somewhere along its path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum SequenceStep {
    Move(Direction),
    Tile(Position),
}

/// Optional path requirement attached to a maze.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "requirement", rename_all = "snake_case")]
pub enum PathConstraints {
    /// The path trace must contain one of the alternatives as a
    /// non-contiguous subsequence (OR semantics across alternatives).
    OrderedSubsequence { alternatives: Vec<Vec<SequenceStep>> },

    /// Every tile must appear somewhere on the path, in any order
    /// (AND semantics).
    RequiredTiles { tiles: Vec<Position> },
}

/// A maze accepted by a generator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratedMaze {
    pub grid: Grid,
    pub start: Position,
    pub goal: Position,

    /// Solver-computed shortest path, in moves. Always greater than or
    /// equal to the profile minimum and never `-1`.
    pub shortest_path: i32,

    pub difficulty: Difficulty,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub constraints: Option<PathConstraints>,
}

impl GeneratedMaze {
    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.grid.height()
    }
}
