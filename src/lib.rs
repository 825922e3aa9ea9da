/*
lib.rs

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

//! Generation and grading engine of the maze benchmark.
//!
//! The crate covers the logical core only: [`generator`] produces grid
//! mazes matching a difficulty profile, [`solver`] computes shortest paths
//! and reachability, [`validator`] replays and grades move sequences, and
//! [`scorer`] turns graded attempts into comparative metrics against the
//! human [`baselines`]. Rendering, prompting, persistence, and network
//! calls live in external layers that only read the immutable types
//! defined here.
//!
//! Everything is synchronous, single-threaded pure computation.
//! Randomness enters only in the generators, and each entry point has a
//! `_with` variant taking an explicit random source for deterministic use.

pub mod baselines;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod scorer;
pub mod solver;
pub mod validator;
