/*
validator.rs

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

//! Replay and grade a move sequence.
//!
//! [`validate`] replays the moves of an attempt from the start cell. The
//! first illegal move (a wall, or past the edge) stops the replay and marks
//! the attempt invalid. A legal move that lands on the goal also stops the
//! replay: trailing moves are discarded, and the path efficiency is the
//! supplied shortest path divided by the executed length, clamped at 1.0.
//!
//! The moves come from an untrusted model, so nothing here panics on bad
//! input: problems become diagnostics inside the [`ValidationResult`].
//! Only out-of-bounds start/goal positions, which the orchestration layer
//! controls, fail fast.
//!
//! When the maze carries [`PathConstraints`] and the goal was reached, the
//! accepted prefix is re-walked to build the visited trace and the
//! constraints are checked against it. A constraint failure never clears
//! the legality or goal-arrival flags; callers fold it into their outcome
//! classification separately.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::grid::{Direction, Grid, Position};
use crate::maze::{PathConstraints, SequenceStep};

/// Outcome of replaying one move sequence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether every executed move was legal.
    pub is_valid: bool,

    /// Whether the path reached the goal.
    pub reaches_goal: bool,

    /// Number of moves actually executed (the accepted prefix).
    pub path_length: usize,

    /// `min(shortest_path / path_length, 1.0)` when the goal was reached,
    /// absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub efficiency: Option<f64>,

    /// Where the replay stopped.
    pub final_position: Position,

    /// Index of the first illegal move, when there is one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_at_move: Option<usize>,

    /// Diagnostic for an invalid attempt.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,

    /// Whether the maze's path constraints were satisfied; absent when the
    /// maze has none or the goal was not reached.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub constraints_satisfied: Option<bool>,

    /// Diagnostic for an unsatisfied constraint.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub constraint_message: Option<String>,
}

/// Replay `moves` from `start` and grade the attempt.
///
/// `shortest_path` is a policy input: constraint-driven mazes legitimately
/// carry a value that differs from a fresh solve, which is why the
/// efficiency is clamped here instead of recomputed.
///
/// # Panics
///
/// Out-of-bounds start or goal positions are programmer errors and panic.
pub fn validate(
    grid: &Grid,
    start: Position,
    goal: Position,
    shortest_path: i32,
    moves: &[Direction],
    constraints: Option<&PathConstraints>,
) -> ValidationResult {
    assert!(grid.contains(start), "start position out of bounds");
    assert!(grid.contains(goal), "goal position out of bounds");

    let mut pos: Position = start;
    let mut result = ValidationResult {
        is_valid: true,
        reaches_goal: false,
        path_length: moves.len(),
        efficiency: None,
        final_position: start,
        error_at_move: None,
        error: None,
        constraints_satisfied: None,
        constraint_message: None,
    };

    for (i, &direction) in moves.iter().enumerate() {
        if !grid.can_move(pos, direction) {
            debug!("illegal move {direction} at step {i} from {pos}");
            result.is_valid = false;
            result.path_length = i;
            result.final_position = pos;
            result.error_at_move = Some(i);
            result.error = Some(format!("illegal move {direction} at step {i} from {pos}"));
            return result;
        }
        // can_move already checked the bounds
        pos = grid.neighbor(pos, direction).unwrap();
        if pos == goal {
            // Trailing moves are discarded.
            result.reaches_goal = true;
            result.path_length = i + 1;
            result.efficiency =
                Some((f64::from(shortest_path) / result.path_length as f64).min(1.0));
            break;
        }
    }
    result.final_position = pos;

    if result.reaches_goal {
        if let Some(constraints) = constraints {
            let (satisfied, message) =
                check_constraints(grid, start, &moves[..result.path_length], constraints);
            result.constraints_satisfied = Some(satisfied);
            result.constraint_message = message;
        }
    }
    result
}

/// Re-walk the accepted prefix and check the constraints against the
/// visited trace.
fn check_constraints(
    grid: &Grid,
    start: Position,
    prefix: &[Direction],
    constraints: &PathConstraints,
) -> (bool, Option<String>) {
    // The prefix was already validated, so the re-walk cannot fail.
    let mut positions: Vec<Position> = Vec::with_capacity(prefix.len() + 1);
    positions.push(start);
    let mut pos: Position = start;
    for &direction in prefix {
        pos = grid.neighbor(pos, direction).unwrap();
        positions.push(pos);
    }

    match constraints {
        PathConstraints::RequiredTiles { tiles } => {
            for tile in tiles {
                if !grid.contains(*tile) {
                    return (
                        false,
                        Some(format!("constraint references out-of-bounds tile {tile}")),
                    );
                }
            }
            let visited: HashSet<Position> = positions.iter().copied().collect();
            match tiles.iter().find(|t| !visited.contains(t)) {
                Some(missing) => (
                    false,
                    Some(format!("required tile {missing} was never visited")),
                ),
                None => (true, None),
            }
        }

        PathConstraints::OrderedSubsequence { alternatives } => {
            for tile in alternatives.iter().flatten() {
                if let SequenceStep::Tile(tile) = tile {
                    if !grid.contains(*tile) {
                        return (
                            false,
                            Some(format!(
                                "constraint references out-of-bounds tile {tile}"
                            )),
                        );
                    }
                }
            }
            // OR across alternatives: the first match wins.
            for alternative in alternatives {
                if matches_subsequence(prefix, &positions, alternative) {
                    return (true, None);
                }
            }
            (
                false,
                Some(format!(
                    "path does not contain any of the {} required subsequences",
                    alternatives.len()
                )),
            )
        }
    }
}

/// Whether the trace contains `steps` as a non-contiguous subsequence.
///
/// The trace is scanned once: a [`SequenceStep::Move`] consumes moves, a
/// [`SequenceStep::Tile`] consumes visited positions (the start cell
/// counts). Later steps only match after the point where the previous step
/// matched.
fn matches_subsequence(
    moves: &[Direction],
    positions: &[Position],
    steps: &[SequenceStep],
) -> bool {
    // Two cursors over the same trace: position i is reached by move i-1,
    // and standing on position i precedes move i.
    let mut move_cursor: usize = 0;
    let mut pos_cursor: usize = 0;
    for step in steps {
        match step {
            SequenceStep::Move(direction) => {
                match moves[move_cursor..].iter().position(|m| m == direction) {
                    Some(offset) => {
                        let matched: usize = move_cursor + offset;
                        move_cursor = matched + 1;
                        pos_cursor = pos_cursor.max(matched + 1);
                    }
                    None => return false,
                }
            }
            SequenceStep::Tile(tile) => {
                match positions[pos_cursor..].iter().position(|p| p == tile) {
                    Some(offset) => {
                        let matched: usize = pos_cursor + offset;
                        pos_cursor = matched + 1;
                        move_cursor = move_cursor.max(matched);
                    }
                    None => return false,
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 grid whose only corridor is (0,0) down to (0,2) then right to
    /// (2,2), shortest path 4.
    fn sample_grid() -> Grid {
        let mut grid = Grid::new(3, 3);
        let mut pos = Position::new(0, 0);
        pos = grid.carve(pos, Direction::Down);
        pos = grid.carve(pos, Direction::Down);
        pos = grid.carve(pos, Direction::Right);
        grid.carve(pos, Direction::Right);
        grid
    }

    #[test]
    fn optimal_path_scores_full_efficiency() {
        let grid = sample_grid();
        let moves = [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ];
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves,
            None,
        );
        assert!(result.is_valid);
        assert!(result.reaches_goal);
        assert_eq!(result.path_length, 4);
        assert_eq!(result.efficiency, Some(1.0));
        assert_eq!(result.final_position, Position::new(2, 2));
    }

    #[test]
    fn first_illegal_move_stops_the_replay() {
        // Moving up from (0,0) hits the top wall.
        let grid = sample_grid();
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &[Direction::Up],
            None,
        );
        assert!(!result.is_valid);
        assert!(!result.reaches_goal);
        assert_eq!(result.error_at_move, Some(0));
        assert_eq!(result.final_position, Position::new(0, 0));
        assert!(result.error.is_some());
    }

    #[test]
    fn efficiency_is_clamped_at_one() {
        // The caller-supplied shortest path exceeds the
        // executed length; the ratio is clamped instead of reported as 2.5.
        let grid = sample_grid();
        let moves = [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ];
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            10,
            &moves,
            None,
        );
        assert_eq!(result.efficiency, Some(1.0));
    }

    #[test]
    fn trailing_moves_are_discarded() {
        let grid = sample_grid();
        let moves = [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
            // Already at the goal; these must not run (the first one would
            // be illegal anyway).
            Direction::Up,
            Direction::Up,
        ];
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves,
            None,
        );
        assert!(result.is_valid);
        assert!(result.reaches_goal);
        assert_eq!(result.path_length, 4);
    }

    #[test]
    fn exhausted_moves_without_goal() {
        let grid = sample_grid();
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &[Direction::Down],
            None,
        );
        assert!(result.is_valid);
        assert!(!result.reaches_goal);
        assert_eq!(result.efficiency, None);
        assert_eq!(result.final_position, Position::new(0, 1));
    }

    #[test]
    fn replaying_the_accepted_prefix_reproduces_final_position() {
        // Round trip: truncating the moves to path_length and replaying
        // lands on the same final position.
        let grid = sample_grid();
        let moves = [Direction::Down, Direction::Down, Direction::Right];
        let first = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves,
            None,
        );
        let replay = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves[..first.path_length],
            None,
        );
        assert_eq!(replay.final_position, first.final_position);
    }

    #[test]
    fn missing_required_tile_is_named() {
        let grid = sample_grid();
        let constraints = PathConstraints::RequiredTiles {
            tiles: vec![Position::new(0, 1), Position::new(1, 1)],
        };
        let moves = [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ];
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves,
            Some(&constraints),
        );
        assert!(result.is_valid);
        assert!(result.reaches_goal);
        assert_eq!(result.constraints_satisfied, Some(false));
        assert!(
            result
                .constraint_message
                .as_deref()
                .unwrap()
                .contains("(1, 1)")
        );
    }

    #[test]
    fn visited_required_tiles_are_satisfied() {
        let grid = sample_grid();
        let constraints = PathConstraints::RequiredTiles {
            tiles: vec![Position::new(0, 0), Position::new(0, 2)],
        };
        let moves = [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ];
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves,
            Some(&constraints),
        );
        assert_eq!(result.constraints_satisfied, Some(true));
        assert_eq!(result.constraint_message, None);
    }

    #[test]
    fn ordered_subsequence_needs_only_one_alternative() {
        let grid = sample_grid();
        let constraints = PathConstraints::OrderedSubsequence {
            alternatives: vec![
                // Never matches: the corridor has no UP move.
                vec![SequenceStep::Move(Direction::Up)],
                // Matches non-contiguously: DOWN ... RIGHT with the second
                // DOWN in between, plus a tile on the way.
                vec![
                    SequenceStep::Move(Direction::Down),
                    SequenceStep::Tile(Position::new(0, 2)),
                    SequenceStep::Move(Direction::Right),
                ],
            ],
        };
        let moves = [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ];
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves,
            Some(&constraints),
        );
        assert_eq!(result.constraints_satisfied, Some(true));
    }

    #[test]
    fn ordered_subsequence_respects_order() {
        let grid = sample_grid();
        // RIGHT before DOWN never happens on this corridor.
        let constraints = PathConstraints::OrderedSubsequence {
            alternatives: vec![vec![
                SequenceStep::Move(Direction::Right),
                SequenceStep::Tile(Position::new(0, 0)),
            ]],
        };
        let moves = [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ];
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves,
            Some(&constraints),
        );
        assert_eq!(result.constraints_satisfied, Some(false));
    }

    #[test]
    fn out_of_bounds_constraint_is_a_diagnostic_not_a_crash() {
        let grid = sample_grid();
        let constraints = PathConstraints::RequiredTiles {
            tiles: vec![Position::new(9, 9)],
        };
        let moves = [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ];
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &moves,
            Some(&constraints),
        );
        assert!(result.is_valid);
        assert_eq!(result.constraints_satisfied, Some(false));
        assert!(
            result
                .constraint_message
                .as_deref()
                .unwrap()
                .contains("out-of-bounds")
        );
    }

    #[test]
    fn constraints_are_skipped_when_the_goal_is_missed() {
        let grid = sample_grid();
        let constraints = PathConstraints::RequiredTiles {
            tiles: vec![Position::new(0, 1)],
        };
        let result = validate(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            4,
            &[Direction::Down],
            Some(&constraints),
        );
        assert!(!result.reaches_goal);
        assert_eq!(result.constraints_satisfied, None);
    }
}
