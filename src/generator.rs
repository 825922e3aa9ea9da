/*
generator.rs

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

//! Generate random mazes for a difficulty tier.
//!
//! Two interchangeable algorithms produce a connected
//! [`crate::maze::GeneratedMaze`] matching a [`profile::DifficultyProfile`]:
//!
//! * [`dfs`] carves a maze with a randomized depth-first walk, optionally
//!   opens extra walls to create shortcuts, and rejection-samples until the
//!   solved shortest path meets the profile minimum.
//!
//! * [`spine`] front-loads the difficulty shape instead: it first lays a
//!   tortuosity-controlled guaranteed route (the spine, built by
//!   [`spine_walk::SpineWalk`]) and then grows bounded dead-end branches
//!   off it.
//!
//! Both run a bounded retry loop and return `None` when no candidate met
//! the profile within `max_attempts`: an explicit failure, never a
//! degraded maze.

pub mod dfs;
pub mod profile;
pub mod spine;
pub mod spine_walk;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::maze::GeneratedMaze;
use profile::DifficultyProfile;

/// Selectable generation algorithm.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Dfs,
    #[default]
    SpineFirst,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Dfs => write!(f, "dfs"),
            Algorithm::SpineFirst => write!(f, "spine-first"),
        }
    }
}

/// Generate a maze with the given algorithm, using the thread-local random
/// source.
pub fn generate(
    algorithm: Algorithm,
    profile: &DifficultyProfile,
    max_attempts: usize,
) -> Option<GeneratedMaze> {
    generate_with(algorithm, profile, max_attempts, &mut rand::rng())
}

/// Generate a maze with the given algorithm and random source. The result
/// is deterministic for a fixed source.
pub fn generate_with<R: Rng>(
    algorithm: Algorithm,
    profile: &DifficultyProfile,
    max_attempts: usize,
    rng: &mut R,
) -> Option<GeneratedMaze> {
    match algorithm {
        Algorithm::Dfs => dfs::generate_with(profile, max_attempts, rng),
        Algorithm::SpineFirst => spine::generate_with(profile, max_attempts, rng),
    }
}
