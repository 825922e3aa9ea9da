/*
spine_walk.rs

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

//! Build the spine: a self-avoiding random walk from start to goal.
//!
//! The walk is a bounded backtracking search over an explicit stack of
//! candidate frames. At each cell it tries the in-bounds, not-yet-visited
//! neighbors in a random order; on a dead end it backtracks. Reaching the
//! goal ends the walk, and the walk is only valid if, at that moment, its
//! length is at least `tortuosity x manhattan(start, goal)` moves and its
//! direction-change count is at least `min_turns`. A walk that reaches the
//! goal before meeting those floors, or that backtracks all the way out,
//! fails the whole spine; the caller then re-rolls dimensions and
//! positions.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::grid::{Direction, Position};

/// Upper bound on search steps for one walk. The search is bounded by
/// construction; there is no wall-clock timeout.
const STEP_BUDGET: usize = 200_000;

/// Type of errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SpineError {
    /// The walk backtracked all the way out without reaching the goal.
    NoPath,

    /// The walk reached the goal before meeting the length or turn floors.
    GoalTooEarly,

    /// The search exceeded its step budget.
    BudgetExhausted,
}

/// [`SpineWalk`] object.
pub struct SpineWalk {
    /// Grid width in cells.
    width: usize,

    /// Grid height in cells.
    height: usize,

    /// Starting cell of the walk.
    pub start: Position,

    /// Goal cell of the walk.
    pub goal: Position,

    /// Minimum walk length, in moves: `ceil(tortuosity * manhattan)`.
    pub min_length: usize,

    /// Minimum number of direction changes.
    pub min_turns: usize,

    /// Number of search steps it took to build the last walk.
    pub steps: usize,
}

impl SpineWalk {
    /// Create the object.
    pub fn new(
        width: usize,
        height: usize,
        start: Position,
        goal: Position,
        tortuosity: f64,
        min_turns: usize,
    ) -> Self {
        let manhattan: usize = start.manhattan(goal);
        Self {
            width,
            height,
            start,
            goal,
            min_length: (tortuosity * manhattan as f64).ceil() as usize,
            min_turns,
            steps: 0,
        }
    }

    /// Generate and return a spine: the ordered list of cells from start to
    /// goal, each adjacent to the next.
    ///
    /// # Errors
    ///
    /// The method returns an error if the walk strands, reaches the goal
    /// too early, or exceeds its step budget. The caller can retry with
    /// fresh dimensions and positions.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<Position>, SpineError> {
        self.steps = 0;

        let mut path: Vec<Position> = vec![self.start];
        let mut visited: HashSet<Position> = HashSet::from([self.start]);
        // One frame of untried candidate cells per path position.
        let mut frames: Vec<Vec<Position>> = vec![self.candidates(self.start, rng)];

        loop {
            self.steps += 1;
            if self.steps > STEP_BUDGET {
                debug!("spine walk gave up after {STEP_BUDGET} steps");
                return Err(SpineError::BudgetExhausted);
            }

            let frame: &mut Vec<Position> = match frames.last_mut() {
                Some(f) => f,
                None => return Err(SpineError::NoPath),
            };
            let next: Position = match frame.pop() {
                Some(p) => p,
                None => {
                    // Dead end: backtrack one cell.
                    frames.pop();
                    if let Some(p) = path.pop() {
                        visited.remove(&p);
                    }
                    if frames.is_empty() {
                        debug!("spine walk backtracked all the way out");
                        return Err(SpineError::NoPath);
                    }
                    continue;
                }
            };

            // A candidate recorded earlier may have joined the path since.
            if visited.contains(&next) {
                continue;
            }

            if next == self.goal {
                // `path` holds the cells before the goal, so its length is
                // the number of moves the finished walk would have.
                let length: usize = path.len();
                let turns: usize = count_turns(&path, self.goal);
                if length >= self.min_length && turns >= self.min_turns {
                    path.push(self.goal);
                    debug!(
                        "spine walk done: length = {length}  turns = {turns}  steps = {}",
                        self.steps
                    );
                    return Ok(path);
                }
                debug!(
                    "spine walk reached the goal too early: length = {length} < {}  \
                     or turns = {turns} < {}",
                    self.min_length, self.min_turns
                );
                return Err(SpineError::GoalTooEarly);
            }

            path.push(next);
            visited.insert(next);
            let mut candidates: Vec<Position> = self.candidates(next, rng);
            candidates.retain(|c| !visited.contains(c));
            frames.push(candidates);
        }
    }

    /// Return the in-bounds neighbors of a cell in a random try order.
    ///
    /// Candidates are popped from the back, so the last element is tried
    /// first.
    fn candidates<R: Rng>(&self, pos: Position, rng: &mut R) -> Vec<Position> {
        let mut neighbors: Vec<Position> = Direction::ALL
            .into_iter()
            .filter_map(|d| {
                let (dx, dy) = d.delta();
                let x: i64 = pos.x as i64 + dx;
                let y: i64 = pos.y as i64 + dy;
                if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
                    None
                } else {
                    Some(Position::new(x as usize, y as usize))
                }
            })
            .collect();
        neighbors.shuffle(rng);
        neighbors
    }
}

/// Count the direction changes along `path` extended with `last`.
fn count_turns(path: &[Position], last: Position) -> usize {
    let mut turns: usize = 0;
    let mut previous_delta: Option<(i64, i64)> = None;
    let mut cells: Vec<Position> = path.to_vec();
    cells.push(last);
    for pair in cells.windows(2) {
        let delta = (
            pair[1].x as i64 - pair[0].x as i64,
            pair[1].y as i64 - pair[0].y as i64,
        );
        if let Some(prev) = previous_delta {
            if prev != delta {
                turns += 1;
            }
        }
        previous_delta = Some(delta);
    }
    turns
}
