/*
baselines.rs

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

//! Calibrated human baselines.
//!
//! The scorer compares an agent's timing and accuracy to a human reference
//! per difficulty tier. Two named variants exist: the *average* baseline
//! and the stricter *elite* one (faster, more accurate). A
//! [`BaselineTable`] starts from the bundled defaults of one variant and
//! can be partially overridden per benchmark instance from plain JSON,
//! without a rebuild.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::generator::profile::Difficulty;

/// Human reference for one difficulty tier.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct HumanBaseline {
    /// Typical solving time, in seconds.
    pub time_seconds: f64,

    /// Success rate, between 0 and 1.
    pub accuracy: f64,
}

/// Which human reference to compare against.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum BaselineKind {
    #[default]
    Average,
    Elite,
}

/// Per-tier baselines for one benchmark instance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BaselineTable {
    entries: HashMap<Difficulty, HumanBaseline>,
}

impl BaselineTable {
    /// Bundled defaults for the given variant, covering every tier.
    pub fn defaults(kind: BaselineKind) -> Self {
        let entries = match kind {
            BaselineKind::Average => [
                (Difficulty::Simple, HumanBaseline { time_seconds: 20.0, accuracy: 0.99 }),
                (Difficulty::Easy, HumanBaseline { time_seconds: 40.0, accuracy: 0.97 }),
                (Difficulty::Medium, HumanBaseline { time_seconds: 90.0, accuracy: 0.92 }),
                (Difficulty::Hard, HumanBaseline { time_seconds: 180.0, accuracy: 0.85 }),
                (Difficulty::Expert, HumanBaseline { time_seconds: 300.0, accuracy: 0.75 }),
            ],
            BaselineKind::Elite => [
                (Difficulty::Simple, HumanBaseline { time_seconds: 8.0, accuracy: 1.0 }),
                (Difficulty::Easy, HumanBaseline { time_seconds: 15.0, accuracy: 0.99 }),
                (Difficulty::Medium, HumanBaseline { time_seconds: 35.0, accuracy: 0.97 }),
                (Difficulty::Hard, HumanBaseline { time_seconds: 75.0, accuracy: 0.93 }),
                (Difficulty::Expert, HumanBaseline { time_seconds: 140.0, accuracy: 0.88 }),
            ],
        };
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Bundled defaults with some tiers replaced. Tiers missing from
    /// `overrides` keep their default values.
    pub fn with_overrides(
        kind: BaselineKind,
        overrides: HashMap<Difficulty, HumanBaseline>,
    ) -> Self {
        let mut table = Self::defaults(kind);
        table.entries.extend(overrides);
        table
    }

    /// Return the baseline for a tier.
    ///
    /// The table always covers every tier, since it is built from the
    /// bundled defaults.
    pub fn get(&self, difficulty: Difficulty) -> HumanBaseline {
        self.entries[&difficulty]
    }

    /// Replace the baseline of one tier.
    pub fn set(&mut self, difficulty: Difficulty, baseline: HumanBaseline) {
        self.entries.insert(difficulty, baseline);
    }
}

impl Default for BaselineTable {
    fn default() -> Self {
        Self::defaults(BaselineKind::Average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_tier() {
        for kind in [BaselineKind::Average, BaselineKind::Elite] {
            let table = BaselineTable::defaults(kind);
            for difficulty in Difficulty::ALL {
                let baseline = table.get(difficulty);
                assert!(baseline.time_seconds > 0.0);
                assert!((0.0..=1.0).contains(&baseline.accuracy));
            }
        }
    }

    #[test]
    fn elite_is_stricter_than_average() {
        let average = BaselineTable::defaults(BaselineKind::Average);
        let elite = BaselineTable::defaults(BaselineKind::Elite);
        for difficulty in Difficulty::ALL {
            assert!(elite.get(difficulty).time_seconds < average.get(difficulty).time_seconds);
            assert!(elite.get(difficulty).accuracy >= average.get(difficulty).accuracy);
        }
    }

    #[test]
    fn overrides_replace_only_the_named_tiers() {
        let custom = HumanBaseline {
            time_seconds: 12.5,
            accuracy: 0.5,
        };
        let table = BaselineTable::with_overrides(
            BaselineKind::Average,
            HashMap::from([(Difficulty::Hard, custom)]),
        );
        assert_eq!(table.get(Difficulty::Hard), custom);
        assert_eq!(
            table.get(Difficulty::Easy),
            BaselineTable::defaults(BaselineKind::Average).get(Difficulty::Easy)
        );
    }

    #[test]
    fn tables_round_trip_through_json() {
        let table = BaselineTable::defaults(BaselineKind::Elite);
        let text: String = serde_json::to_string(&table).unwrap();
        let parsed: BaselineTable = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, table);
    }
}
