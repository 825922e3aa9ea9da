/*
grid.rs

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

//! Maze grid representation.
//!
//! A [`Grid`] is a rectangle of [`Cell`] objects, each carrying four
//! independent wall flags. All the walls are present when the grid is
//! created; the generators knock walls down with [`Grid::carve`], which
//! always removes the two facing walls together so that adjacent cells stay
//! reciprocal. After generation the grid is never mutated again.
//!
//! Coordinates follow the maze JSON convention: `(0, 0)` is the top-left
//! cell, `x` grows to the right, and `y` grows downwards, so
//! [`Direction::Up`] decreases `y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four cardinal moves an agent can make.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All the directions, in a fixed order for deterministic iteration.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Return the `(dx, dy)` offset of a one-cell move in this direction.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Return the opposite direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
            Direction::Left => write!(f, "LEFT"),
            Direction::Right => write!(f, "RIGHT"),
        }
    }
}

/// Error raised when a textual action is not one of the four moves.
///
/// Model output is untrusted, so the orchestration layer parses each action
/// with [`Direction::from_str`] and reports this error as an invalid
/// attempt instead of crashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unrecognized action {:?}: expected UP, DOWN, LEFT, or RIGHT",
            self.input
        )
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

/// A cell coordinate inside a [`Grid`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Create a [`Position`] object.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Wall flags of a single cell.
///
/// The field names match the serialized maze format (`cell.walls.top` ...).
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    /// A fresh cell is fully walled.
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

/// A single maze cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub walls: Walls,
}

impl Cell {
    /// Whether the wall towards the given direction is present.
    pub fn wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.walls.top,
            Direction::Down => self.walls.bottom,
            Direction::Left => self.walls.left,
            Direction::Right => self.walls.right,
        }
    }

    fn set_wall(&mut self, direction: Direction, present: bool) {
        match direction {
            Direction::Up => self.walls.top = present,
            Direction::Down => self.walls.bottom = present,
            Direction::Left => self.walls.left = present,
            Direction::Right => self.walls.right = present,
        }
    }
}

/// Rectangular maze grid.
///
/// Cells are stored row by row: `cells[y][x]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a fully walled grid.
    ///
    /// # Panics
    ///
    /// An empty grid is a programmer error; the method panics when a
    /// dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![vec![Cell::default(); width]; height],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the position designates a cell of this grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Return the cell at the given position.
    ///
    /// # Panics
    ///
    /// The position must be in bounds.
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.y][pos.x]
    }

    /// Return the neighboring position in the given direction, or `None`
    /// when the move would leave the grid.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x: i64 = pos.x as i64 + dx;
        let y: i64 = pos.y as i64 + dy;
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            None
        } else {
            Some(Position::new(x as usize, y as usize))
        }
    }

    /// Whether a one-cell move from `pos` is legal: the destination is in
    /// bounds and no wall blocks the way.
    pub fn can_move(&self, pos: Position, direction: Direction) -> bool {
        self.neighbor(pos, direction).is_some() && !self.cell(pos).wall(direction)
    }

    /// Knock down the wall pair between `pos` and its neighbor in the given
    /// direction, and return the neighbor.
    ///
    /// Both facing walls are removed together, which keeps the adjacency
    /// invariant: a cell's wall towards its neighbor is absent iff the
    /// neighbor's facing wall is absent.
    ///
    /// # Panics
    ///
    /// Carving past the edge of the grid is a programmer error.
    pub fn carve(&mut self, pos: Position, direction: Direction) -> Position {
        let next: Position = self
            .neighbor(pos, direction)
            .expect("cannot carve past the edge of the grid");
        self.cells[pos.y][pos.x].set_wall(direction, false);
        self.cells[next.y][next.x].set_wall(direction.opposite(), false);
        next
    }
}
