/*
dfs.rs

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

//! Randomized depth-first maze generator.
//!
//! Each attempt draws random dimensions from the profile, carves a perfect
//! maze with an iterative depth-first walk from the top-left corner,
//! optionally removes extra walls to add loops, places the start and the
//! goal in opposite-corner sub-rectangles, and asks the solver whether the
//! candidate meets the profile's minimum shortest path. Rejected candidates
//! are thrown away; after `max_attempts` rejections the generator reports
//! failure.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::grid::{Direction, Grid, Position};
use crate::maze::GeneratedMaze;
use crate::solver::{self, SolveReport};

use super::profile::DifficultyProfile;

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

        let mut grid = Grid::new(width, height);
        carve_depth_first(&mut grid, Position::new(0, 0), rng);
        if profile.extra_paths > 0 {
            open_shortcuts(&mut grid, width * height / profile.extra_paths, rng);
        }

        let start: Position = random_in_rect(0, 0, width.div_ceil(3), height.div_ceil(3), rng);
        let goal: Position = random_in_rect(
            width - width.div_ceil(3),
            height - height.div_ceil(3),
            width.div_ceil(3),
            height.div_ceil(3),
            rng,
        );
        if start == goal {
            continue;
        }

        let report: SolveReport = solver::solve(&grid, start, goal);
        if report.shortest_path < 0 || report.shortest_path < profile.min_shortest_path {
            debug!(
                "dfs attempt {attempt}: rejected, shortest path {} below minimum {}",
                report.shortest_path, profile.min_shortest_path
            );
            continue;
        }

        debug!(
            "dfs attempt {attempt}: accepted {width}x{height} maze, shortest path {}",
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
    debug!("dfs: no acceptable maze within {max_attempts} attempts");
    None
}

/// Carve a perfect maze with an iterative randomized depth-first walk.
///
/// The walk keeps a stack of the current corridor; on a dead end it
/// backtracks, otherwise it carves towards a uniformly chosen unvisited
/// neighbor.
fn carve_depth_first<R: Rng>(grid: &mut Grid, from: Position, rng: &mut R) {
    let mut visited = vec![vec![false; grid.width()]; grid.height()];
    let mut stack: Vec<Position> = vec![from];
    visited[from.y][from.x] = true;

    while let Some(&pos) = stack.last() {
        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| {
                grid.neighbor(pos, *d)
                    .is_some_and(|n| !visited[n.y][n.x])
            })
            .collect();
        match candidates.choose(rng) {
            Some(&direction) => {
                let next: Position = grid.carve(pos, direction);
                visited[next.y][next.x] = true;
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Remove `count` random interior walls to create loops.
fn open_shortcuts<R: Rng>(grid: &mut Grid, count: usize, rng: &mut R) {
    let mut removed: usize = 0;
    // A wall pick may already be open; allow a bounded number of re-picks.
    let mut budget: usize = count * 10;
    while removed < count && budget > 0 {
        budget -= 1;
        let pos = Position::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        let direction: Direction = *Direction::ALL.choose(rng).unwrap();
        if grid.neighbor(pos, direction).is_some() && grid.cell(pos).wall(direction) {
            grid.carve(pos, direction);
            removed += 1;
        }
    }
    debug!("dfs: opened {removed} shortcut walls");
}

/// Pick a random position inside the `w` x `h` rectangle whose top-left
/// corner is `(x0, y0)`.
fn random_in_rect<R: Rng>(x0: usize, y0: usize, w: usize, h: usize, rng: &mut R) -> Position {
    Position::new(
        rng.random_range(x0..x0 + w),
        rng.random_range(y0..y0 + h),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{Difficulty, default_profiles};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_reciprocal_walls(grid: &Grid) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = Position::new(x, y);
                for direction in Direction::ALL {
                    if let Some(next) = grid.neighbor(pos, direction) {
                        assert_eq!(
                            grid.cell(pos).wall(direction),
                            grid.cell(next).wall(direction.opposite()),
                            "walls between {pos} and {next} are not reciprocal"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn carving_connects_every_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(12, 9);
        carve_depth_first(&mut grid, Position::new(0, 0), &mut rng);
        let report = solver::solve(&grid, Position::new(0, 0), Position::new(11, 8));
        assert_eq!(report.total_reachable, 12 * 9);
        assert!(report.shortest_path > 0);
        assert_reciprocal_walls(&grid);
    }

    #[test]
    fn generated_mazes_meet_the_profile() {
        let mut rng = StdRng::seed_from_u64(99);
        let profile = &default_profiles()[&Difficulty::Easy];
        for _ in 0..5 {
            let maze = generate_with(profile, 200, &mut rng)
                .expect("easy profile should generate within 200 attempts");
            assert_eq!(maze.difficulty, Difficulty::Easy);
            assert!(maze.shortest_path >= profile.min_shortest_path);
            assert_ne!(maze.start, maze.goal);
            assert!(maze.grid.contains(maze.start));
            assert!(maze.grid.contains(maze.goal));
            assert_reciprocal_walls(&maze.grid);
            // The recorded shortest path is the solver's answer.
            let report = solver::solve(&maze.grid, maze.start, maze.goal);
            assert_eq!(report.shortest_path, maze.shortest_path);
        }
    }

    #[test]
    fn exhausting_attempts_returns_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut profile = default_profiles()[&Difficulty::Simple].clone();
        // Unreachable requirement: a 6x6 grid cannot have a 500-move path.
        profile.min_shortest_path = 500;
        assert!(generate_with(&profile, 20, &mut rng).is_none());
    }

    #[test]
    fn shortcuts_shorten_the_optimal_route() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(15, 15);
        carve_depth_first(&mut grid, Position::new(0, 0), &mut rng);
        let before = solver::solve(&grid, Position::new(0, 0), Position::new(14, 14));
        open_shortcuts(&mut grid, 40, &mut rng);
        let after = solver::solve(&grid, Position::new(0, 0), Position::new(14, 14));
        assert!(after.shortest_path <= before.shortest_path);
        assert_reciprocal_walls(&grid);
    }
}
