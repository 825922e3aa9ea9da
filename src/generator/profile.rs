/*
profile.rs

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

//! Difficulty tiers and their generation profiles.
//!
//! A [`DifficultyProfile`] bundles every knob the generators need for one
//! tier: dimension ranges, the minimum acceptable shortest path, and the
//! algorithm parameters of both the DFS and the spine-first modes. The
//! bundled defaults returned by [`default_profiles`] are plain serializable
//! data, so a benchmark instance can replace them from a JSON file without
//! rebuilding.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use strum_macros::FromRepr;

/// Benchmark difficulty tier.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(i32)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Simple,
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All the tiers, easiest first.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Simple,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Simple => write!(f, "simple"),
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Expert => write!(f, "expert"),
        }
    }
}

/// Generation parameters for one difficulty tier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DifficultyProfile {
    /// Tier this profile describes; recorded in the generated mazes.
    pub difficulty: Difficulty,

    /// Inclusive width range a candidate maze is drawn from.
    pub min_width: usize,
    pub max_width: usize,

    /// Inclusive height range a candidate maze is drawn from.
    pub min_height: usize,
    pub max_height: usize,

    /// A candidate is rejected when its solved shortest path is below this.
    pub min_shortest_path: i32,

    /// DFS mode: after carving, `floor(width * height / extra_paths)` extra
    /// walls are removed to create loops. Zero disables the shortcuts; a
    /// smaller non-zero value means more shortcuts, so an easier maze.
    pub extra_paths: usize,

    /// Spine-first mode: probability of starting a branch at an eligible
    /// spine cell.
    pub branch_chance: f64,

    /// Spine-first mode: inclusive branch length range, in cells.
    pub min_branch_length: usize,
    pub max_branch_length: usize,

    /// Spine-first mode: minimum ratio of spine length to the Manhattan
    /// distance between start and goal.
    pub tortuosity: f64,

    /// Spine-first mode: minimum number of direction changes on the spine.
    pub min_turns: usize,

    /// Spine-first mode: minimum number of spine cells between two branch
    /// starts.
    pub min_branch_spacing: usize,

    /// Spine-first mode: probability for each branch cell to spawn one
    /// sub-branch.
    pub sub_branch_chance: f64,

    /// Spine-first mode: whether to connect the cells left unvisited after
    /// branch growth.
    pub fill_remaining: bool,
}

impl DifficultyProfile {
    /// Return the bundled default profile for a tier.
    pub fn default_for(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Simple => Self {
                difficulty,
                min_width: 5,
                max_width: 6,
                min_height: 5,
                max_height: 6,
                min_shortest_path: 8,
                extra_paths: 4,
                branch_chance: 0.3,
                min_branch_length: 1,
                max_branch_length: 3,
                tortuosity: 1.2,
                min_turns: 2,
                min_branch_spacing: 1,
                sub_branch_chance: 0.1,
                fill_remaining: true,
            },
            Difficulty::Easy => Self {
                difficulty,
                min_width: 7,
                max_width: 8,
                min_height: 7,
                max_height: 8,
                min_shortest_path: 14,
                extra_paths: 6,
                branch_chance: 0.4,
                min_branch_length: 2,
                max_branch_length: 4,
                tortuosity: 1.5,
                min_turns: 4,
                min_branch_spacing: 1,
                sub_branch_chance: 0.15,
                fill_remaining: true,
            },
            Difficulty::Medium => Self {
                difficulty,
                min_width: 9,
                max_width: 11,
                min_height: 9,
                max_height: 11,
                min_shortest_path: 22,
                extra_paths: 8,
                branch_chance: 0.5,
                min_branch_length: 2,
                max_branch_length: 5,
                tortuosity: 1.8,
                min_turns: 6,
                min_branch_spacing: 2,
                sub_branch_chance: 0.2,
                fill_remaining: true,
            },
            Difficulty::Hard => Self {
                difficulty,
                min_width: 12,
                max_width: 14,
                min_height: 12,
                max_height: 14,
                min_shortest_path: 34,
                extra_paths: 12,
                branch_chance: 0.6,
                min_branch_length: 3,
                max_branch_length: 6,
                tortuosity: 2.1,
                min_turns: 8,
                min_branch_spacing: 2,
                sub_branch_chance: 0.25,
                fill_remaining: true,
            },
            Difficulty::Expert => Self {
                difficulty,
                min_width: 15,
                max_width: 18,
                min_height: 15,
                max_height: 18,
                min_shortest_path: 56,
                extra_paths: 0,
                branch_chance: 0.7,
                min_branch_length: 3,
                max_branch_length: 8,
                tortuosity: 2.5,
                min_turns: 10,
                min_branch_spacing: 3,
                sub_branch_chance: 0.3,
                fill_remaining: true,
            },
        }
    }
}

/// Return the bundled default profiles, one per tier.
pub fn default_profiles() -> HashMap<Difficulty, DifficultyProfile> {
    Difficulty::ALL
        .iter()
        .map(|d| (*d, DifficultyProfile::default_for(*d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_tier() {
        let profiles = default_profiles();
        assert_eq!(profiles.len(), Difficulty::ALL.len());
        for difficulty in Difficulty::ALL {
            let profile = &profiles[&difficulty];
            assert_eq!(profile.difficulty, difficulty);
            assert!(profile.min_width >= 2 && profile.min_width <= profile.max_width);
            assert!(profile.min_height >= 2 && profile.min_height <= profile.max_height);
            assert!(profile.min_shortest_path > 0);
            assert!(profile.tortuosity >= 1.0);
            assert!(profile.min_branch_length <= profile.max_branch_length);
            assert!((0.0..=1.0).contains(&profile.branch_chance));
            assert!((0.0..=1.0).contains(&profile.sub_branch_chance));
        }
    }

    #[test]
    fn tiers_get_harder() {
        let profiles = default_profiles();
        for pair in Difficulty::ALL.windows(2) {
            let easier = &profiles[&pair[0]];
            let harder = &profiles[&pair[1]];
            assert!(easier.min_shortest_path < harder.min_shortest_path);
            assert!(easier.max_width <= harder.max_width);
        }
    }

    #[test]
    fn profiles_round_trip_through_json() {
        let profiles = default_profiles();
        let text: String = serde_json::to_string(&profiles).unwrap();
        let parsed: HashMap<Difficulty, DifficultyProfile> =
            serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, profiles);
    }

    #[test]
    fn difficulty_serializes_lower_case() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Expert).unwrap(),
            "\"expert\""
        );
        let parsed: Difficulty = serde_json::from_str("\"simple\"").unwrap();
        assert_eq!(parsed, Difficulty::Simple);
    }
}
