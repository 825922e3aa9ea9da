/*
spine.rs

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

//! Spine-first maze generator.
//!
//! Instead of rejection-sampling random mazes, this generator front-loads
//! the difficulty shape. Each attempt:
//!
//! 1. draws the start and the goal from an opposite pair of diagonal
//!    quadrants;
//! 2. builds the spine with [`SpineWalk`] and carves it; at this point
//!    the spine is *the* shortest path because no other passage exists;
//! 3. grows dead-end branches off the spine. A branch is a self-avoiding
//!    walk into untouched cells; it never reconnects to carved territory,
//!    which would create an alternate route. Branch cells may spawn
//!    sub-branches; spawning uses an explicit work stack, not call
//!    recursion, so deep cascades cannot exhaust the call stack;
//! 4. when the profile asks for it, connects the remaining untouched cells
//!    with a randomized depth-first carve, opening a single doorway per
//!    leftover region;
//! 5. re-runs the solver and rejects the attempt if filling shortened the
//!    route below the spine length or the profile minimum is not met.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

use crate::grid::{Direction, Grid, Position};
use crate::maze::GeneratedMaze;
use crate::solver::{self, SolveReport};

use super::profile::DifficultyProfile;
use super::spine_walk::SpineWalk;

/// Generate a maze with the thread-local random source.
pub fn generate(profile: &DifficultyProfile, max_attempts: usize) -> Option<GeneratedMaze> {
    generate_with(profile, max_attempts, &mut rand::rng())
}

/// Generate a maze with the given random source.
///
/// Return `None` when no candidate met the profile within `max_attempts`.
pub fn generate_with<R: Rng>(
    profile: &DifficultyProfile,
    max_attempts: usize,
    rng: &mut R,
) -> Option<GeneratedMaze> {
    for attempt in 0..max_attempts {
        let width: usize = rng.random_range(profile.min_width..=profile.max_width);
        let height: usize = rng.random_range(profile.min_height..=profile.max_height);
        let (start, goal) = quadrant_endpoints(width, height, rng);

        let mut walk = SpineWalk::new(
            width,
            height,
            start,
            goal,
            profile.tortuosity,
            profile.min_turns,
        );
        let spine: Vec<Position> = match walk.generate(rng) {
            Ok(s) => s,
            Err(e) => {
                debug!("spine attempt {attempt}: no valid spine ({e:?})");
                continue;
            }
        };

        let mut grid = Grid::new(width, height);
        let mut visited: HashSet<Position> = spine.iter().copied().collect();
        carve_path(&mut grid, &spine);

        grow_branches(&mut grid, &spine, &mut visited, profile, rng);
        if profile.fill_remaining {
            fill_remaining(&mut grid, &mut visited, rng);
        }

        // The fill step may have opened a connection that shortens the
        // route, so the spine guarantee is re-checked with a fresh solve.
        let spine_length: i32 = (spine.len() - 1) as i32;
        let report: SolveReport = solver::solve(&grid, start, goal);
        if report.shortest_path != spine_length {
            debug!(
                "spine attempt {attempt}: filling broke the spine guarantee \
                 ({} instead of {spine_length})",
                report.shortest_path
            );
            continue;
        }
        if report.shortest_path < profile.min_shortest_path {
            debug!(
                "spine attempt {attempt}: rejected, shortest path {} below minimum {}",
                report.shortest_path, profile.min_shortest_path
            );
            continue;
        }

        debug!(
            "spine attempt {attempt}: accepted {width}x{height} maze, shortest path {}",
            report.shortest_path
        );
        return Some(GeneratedMaze {
            grid,
            start,
            goal,
            shortest_path: report.shortest_path,
            difficulty: profile.difficulty,
            constraints: None,
        });
    }
    debug!("spine: no acceptable maze within {max_attempts} attempts");
    None
}

/// Draw the start and the goal from an opposite pair of diagonal quadrants.
/// Which pair, and which end is the start, are both randomized.
fn quadrant_endpoints<R: Rng>(width: usize, height: usize, rng: &mut R) -> (Position, Position) {
    let qw: usize = (width / 2).max(1);
    let qh: usize = (height / 2).max(1);

    let top_left = Position::new(rng.random_range(0..qw), rng.random_range(0..qh));
    let bottom_right = Position::new(
        rng.random_range(width - qw..width),
        rng.random_range(height - qh..height),
    );
    let top_right = Position::new(rng.random_range(width - qw..width), rng.random_range(0..qh));
    let bottom_left = Position::new(rng.random_range(0..qw), rng.random_range(height - qh..height));

    let (a, b) = if rng.random_bool(0.5) {
        (top_left, bottom_right)
    } else {
        (top_right, bottom_left)
    };
    if rng.random_bool(0.5) { (a, b) } else { (b, a) }
}

/// Carve the walls along an adjacent-cell path.
fn carve_path(grid: &mut Grid, path: &[Position]) {
    for pair in path.windows(2) {
        let direction: Direction = direction_between(pair[0], pair[1]);
        grid.carve(pair[0], direction);
    }
}

/// Return the move that goes from `from` to the adjacent cell `to`.
///
/// # Panics
///
/// The cells must be adjacent; anything else is a programmer error.
fn direction_between(from: Position, to: Position) -> Direction {
    let dx: i64 = to.x as i64 - from.x as i64;
    let dy: i64 = to.y as i64 - from.y as i64;
    match (dx, dy) {
        (0, -1) => Direction::Up,
        (0, 1) => Direction::Down,
        (-1, 0) => Direction::Left,
        (1, 0) => Direction::Right,
        _ => panic!("cells {from} and {to} are not adjacent"),
    }
}

/// A branch still to grow: the cell it sprouts from and its length budget.
struct BranchJob {
    from: Position,
    remaining: usize,
}

/// Grow dead-end branches off the spine.
///
/// Walking the spine in order, a cell is eligible once at least
/// `min_branch_spacing` spine cells have elapsed since the last branch
/// start; an eligible cell starts a branch with probability
/// `branch_chance`. Branches and sub-branches only ever carve into cells
/// outside `visited`, so they cannot reconnect and create an alternate
/// route.
fn grow_branches<R: Rng>(
    grid: &mut Grid,
    spine: &[Position],
    visited: &mut HashSet<Position>,
    profile: &DifficultyProfile,
    rng: &mut R,
) {
    if profile.max_branch_length == 0 {
        return;
    }

    let mut jobs: Vec<BranchJob> = Vec::new();
    let mut since_last: usize = profile.min_branch_spacing;
    // Branches sprout from the spine's interior, not its endpoints.
    for &cell in spine.iter().skip(1).take(spine.len().saturating_sub(2)) {
        since_last += 1;
        if since_last < profile.min_branch_spacing || !rng.random_bool(profile.branch_chance) {
            continue;
        }
        since_last = 0;
        jobs.push(BranchJob {
            from: cell,
            remaining: rng
                .random_range(profile.min_branch_length..=profile.max_branch_length),
        });
    }

    // Work stack instead of recursion: sub-branches push a new job.
    while let Some(job) = jobs.pop() {
        let mut pos: Position = job.from;
        for _ in 0..job.remaining {
            let candidates: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|d| {
                    grid.neighbor(pos, *d)
                        .is_some_and(|n| !visited.contains(&n))
                })
                .collect();
            let direction: Direction = match candidates.choose(rng) {
                Some(&d) => d,
                None => break,
            };
            pos = grid.carve(pos, direction);
            visited.insert(pos);
            if rng.random_bool(profile.sub_branch_chance) {
                jobs.push(BranchJob {
                    from: pos,
                    remaining: rng
                        .random_range(profile.min_branch_length..=profile.max_branch_length),
                });
            }
        }
    }
}

/// Connect the cells that neither the spine nor the branches reached.
///
/// Each leftover region is carved into a tree with a randomized
/// depth-first walk, then linked to the rest of the maze through a single
/// random doorway. One doorway per region keeps the region a dead-end
/// pocket; the caller still re-solves afterwards to confirm the spine
/// guarantee.
fn fill_remaining<R: Rng>(grid: &mut Grid, visited: &mut HashSet<Position>, rng: &mut R) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let seed = Position::new(x, y);
            if visited.contains(&seed) {
                continue;
            }

            // Carve the whole untouched region as a tree.
            let mut region: HashSet<Position> = HashSet::from([seed]);
            let mut stack: Vec<Position> = vec![seed];
            visited.insert(seed);
            while let Some(&pos) = stack.last() {
                let candidates: Vec<Direction> = Direction::ALL
                    .into_iter()
                    .filter(|d| {
                        grid.neighbor(pos, *d)
                            .is_some_and(|n| !visited.contains(&n))
                    })
                    .collect();
                match candidates.choose(rng) {
                    Some(&direction) => {
                        let next: Position = grid.carve(pos, direction);
                        visited.insert(next);
                        region.insert(next);
                        stack.push(next);
                    }
                    None => {
                        stack.pop();
                    }
                }
            }

            // Open one doorway from the region into the carved maze.
            let doorways: Vec<(Position, Direction)> = region
                .iter()
                .flat_map(|&pos| Direction::ALL.into_iter().map(move |d| (pos, d)))
                .filter(|&(pos, d)| {
                    grid.neighbor(pos, d)
                        .is_some_and(|n| !region.contains(&n))
                })
                .collect();
            if let Some(&(pos, direction)) = doorways.choose(rng) {
                grid.carve(pos, direction);
                debug!("fill: connected a {}-cell region at {pos}", region.len());
            }
        }
    }
}
