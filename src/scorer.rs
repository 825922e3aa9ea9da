/*
scorer.rs

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

//! Score graded attempts against human baselines.
//!
//! Pure arithmetic over [`ScoringRecord`] collections, no I/O. The engine
//! never measures wall-clock time or cost itself; the orchestration layer
//! passes in the numbers it recorded. Per-record metrics combine into
//! run-level aggregates, where failed attempts contribute zeros to the
//! time-efficiency and LMIQ means. Path efficiency alone averages over
//! the successes, since it measures solution quality, not success rate.

use serde::{Deserialize, Serialize};

use crate::baselines::BaselineTable;
use crate::generator::profile::Difficulty;

/// Sustained power draw of a human solving mazes, in watts. The brain's
/// energy budget.
pub const HUMAN_WATTS: f64 = 20.0;

/// Power envelope billed to an agent attempt, in watts. A datacenter
/// accelerator serving one request.
pub const AGENT_WATTS: f64 = 700.0;

/// Outcome classification of one graded attempt.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Reached the goal with every constraint satisfied.
    Success,

    /// Illegal move, wrong answer, or the goal was never reached.
    Failure,

    /// Reached the goal but violated the maze's path constraint.
    ConstraintViolation,
}

impl Outcome {
    /// Whether the attempt counts as a success.
    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

/// Minimal per-attempt facts needed for scoring.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoringRecord {
    pub difficulty: Difficulty,
    pub outcome: Outcome,

    /// Wall-clock time of the attempt, measured by the caller.
    pub elapsed_ms: u64,

    /// Capped path efficiency from validation; absent when unsuccessful.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path_efficiency: Option<f64>,

    /// Provider cost of the attempt, when the caller measured one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cost_usd: Option<f64>,
}

/// Time efficiency of one record: `min(baseline_ms / elapsed_ms, 1.0)` for
/// a success, `0.0` otherwise.
pub fn time_efficiency(record: &ScoringRecord, table: &BaselineTable) -> f64 {
    if !record.outcome.is_success() {
        return 0.0;
    }
    let baseline_ms: f64 = table.get(record.difficulty).time_seconds * 1000.0;
    (baseline_ms / record.elapsed_ms as f64).min(1.0)
}

/// LMIQ of one record: time efficiency times capped path efficiency, `0.0`
/// when unsuccessful or the path efficiency is absent.
pub fn lmiq(record: &ScoringRecord, table: &BaselineTable) -> f64 {
    if !record.outcome.is_success() {
        return 0.0;
    }
    match record.path_efficiency {
        Some(path) => time_efficiency(record, table) * path.min(1.0),
        None => 0.0,
    }
}

/// Share of successful attempts.
pub fn accuracy(records: &[ScoringRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let successes: usize = records.iter().filter(|r| r.outcome.is_success()).count();
    successes as f64 / records.len() as f64
}

/// Mean path efficiency over the successful attempts only.
pub fn mean_path_efficiency(records: &[ScoringRecord]) -> f64 {
    let efficiencies: Vec<f64> = records
        .iter()
        .filter(|r| r.outcome.is_success())
        .filter_map(|r| r.path_efficiency)
        .map(|e| e.min(1.0))
        .collect();
    if efficiencies.is_empty() {
        return 0.0;
    }
    efficiencies.iter().sum::<f64>() / efficiencies.len() as f64
}

/// Mean time efficiency over all the records; failures contribute zeros.
pub fn mean_time_efficiency(records: &[ScoringRecord], table: &BaselineTable) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| time_efficiency(r, table)).sum::<f64>() / records.len() as f64
}

/// Mean LMIQ over all the records; failures contribute zeros.
pub fn mean_lmiq(records: &[ScoringRecord], table: &BaselineTable) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| lmiq(r, table)).sum::<f64>() / records.len() as f64
}

/// Energy spent by the human baseline over the energy spent by the agent,
/// for the same set of attempts. A ratio of 1.0 or more means the agent is
/// more energy-efficient than the human reference.
pub fn energy_efficiency_ratio(records: &[ScoringRecord], table: &BaselineTable) -> f64 {
    let human_joules: f64 = records
        .iter()
        .map(|r| table.get(r.difficulty).time_seconds * HUMAN_WATTS)
        .sum();
    let agent_joules: f64 = records
        .iter()
        .map(|r| r.elapsed_ms as f64 / 1000.0 * AGENT_WATTS)
        .sum();
    if agent_joules == 0.0 {
        return if human_joules == 0.0 { 0.0 } else { f64::INFINITY };
    }
    human_joules / agent_joules
}

/// Total provider cost over the records that carried one.
pub fn total_cost_usd(records: &[ScoringRecord]) -> f64 {
    records.iter().filter_map(|r| r.cost_usd).sum()
}

/// Aggregate metrics for one set of records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub attempts: usize,
    pub successes: usize,
    pub accuracy: f64,
    pub path_efficiency: f64,
    pub time_efficiency: f64,
    pub lmiq: f64,
    pub energy_efficiency_ratio: f64,
    pub total_cost_usd: f64,
}

impl Aggregates {
    /// Compute every aggregate for one set of records.
    pub fn compute(records: &[ScoringRecord], table: &BaselineTable) -> Self {
        Self {
            attempts: records.len(),
            successes: records.iter().filter(|r| r.outcome.is_success()).count(),
            accuracy: accuracy(records),
            path_efficiency: mean_path_efficiency(records),
            time_efficiency: mean_time_efficiency(records, table),
            lmiq: mean_lmiq(records, table),
            energy_efficiency_ratio: energy_efficiency_ratio(records, table),
            total_cost_usd: total_cost_usd(records),
        }
    }
}

/// Run-level summary: the overall aggregates plus one entry per difficulty
/// tier that has records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub overall: Aggregates,
    pub per_difficulty: Vec<(Difficulty, Aggregates)>,
}

/// Summarize a run, overall and filtered per difficulty.
pub fn summary(records: &[ScoringRecord], table: &BaselineTable) -> RunSummary {
    let per_difficulty: Vec<(Difficulty, Aggregates)> = Difficulty::ALL
        .iter()
        .filter_map(|&difficulty| {
            let filtered: Vec<ScoringRecord> = records
                .iter()
                .filter(|r| r.difficulty == difficulty)
                .cloned()
                .collect();
            if filtered.is_empty() {
                None
            } else {
                Some((difficulty, Aggregates::compute(&filtered, table)))
            }
        })
        .collect();
    RunSummary {
        overall: Aggregates::compute(records, table),
        per_difficulty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        difficulty: Difficulty,
        outcome: Outcome,
        elapsed_ms: u64,
        path_efficiency: Option<f64>,
    ) -> ScoringRecord {
        ScoringRecord {
            difficulty,
            outcome,
            elapsed_ms,
            path_efficiency,
            cost_usd: None,
        }
    }

    #[test]
    fn failures_dilute_the_means() {
        // 10 records: 6 fast perfect successes, 4 failures.
        let mut records: Vec<ScoringRecord> = Vec::new();
        for _ in 0..6 {
            records.push(record(Difficulty::Medium, Outcome::Success, 1, Some(1.0)));
        }
        for _ in 0..4 {
            records.push(record(Difficulty::Medium, Outcome::Failure, 60_000, None));
        }
        let table = BaselineTable::default();
        assert!((accuracy(&records) - 0.6).abs() < 1e-9);
        assert!((mean_path_efficiency(&records) - 1.0).abs() < 1e-9);
        assert!(mean_time_efficiency(&records, &table) <= 0.6 + 1e-9);
        assert!(mean_lmiq(&records, &table) <= 0.6 + 1e-9);
    }

    #[test]
    fn failed_records_score_zero() {
        let table = BaselineTable::default();
        let failed = record(Difficulty::Easy, Outcome::Failure, 100, Some(0.9));
        assert_eq!(time_efficiency(&failed, &table), 0.0);
        assert_eq!(lmiq(&failed, &table), 0.0);
        let violated = record(Difficulty::Easy, Outcome::ConstraintViolation, 100, Some(1.0));
        assert_eq!(time_efficiency(&violated, &table), 0.0);
        assert!(!violated.outcome.is_success());
    }

    #[test]
    fn time_efficiency_is_clamped() {
        let table = BaselineTable::default();
        // Easy average baseline is 40 s.
        let fast = record(Difficulty::Easy, Outcome::Success, 2_000, Some(1.0));
        assert_eq!(time_efficiency(&fast, &table), 1.0);
        let slow = record(Difficulty::Easy, Outcome::Success, 80_000, Some(1.0));
        assert!((time_efficiency(&slow, &table) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn lmiq_combines_both_efficiencies() {
        let table = BaselineTable::default();
        // Half the baseline speed, 80% path efficiency.
        let r = record(Difficulty::Easy, Outcome::Success, 80_000, Some(0.8));
        assert!((lmiq(&r, &table) - 0.4).abs() < 1e-9);
        // Missing efficiency scores zero even for a success.
        let missing = record(Difficulty::Easy, Outcome::Success, 1_000, None);
        assert_eq!(lmiq(&missing, &table), 0.0);
    }

    #[test]
    fn energy_ratio_favors_fast_agents() {
        let table = BaselineTable::default();
        // Medium baseline 90 s of human at 20 W = 1800 J; the agent takes
        // 2 s at 700 W = 1400 J.
        let records = vec![record(Difficulty::Medium, Outcome::Success, 2_000, Some(1.0))];
        let ratio = energy_efficiency_ratio(&records, &table);
        assert!((ratio - 1800.0 / 1400.0).abs() < 1e-9);
        assert!(ratio >= 1.0);
    }

    #[test]
    fn empty_runs_score_zero() {
        let table = BaselineTable::default();
        assert_eq!(accuracy(&[]), 0.0);
        assert_eq!(mean_path_efficiency(&[]), 0.0);
        assert_eq!(mean_time_efficiency(&[], &table), 0.0);
        assert_eq!(mean_lmiq(&[], &table), 0.0);
        assert_eq!(energy_efficiency_ratio(&[], &table), 0.0);
    }

    #[test]
    fn summary_filters_per_difficulty() {
        let table = BaselineTable::default();
        let records = vec![
            record(Difficulty::Easy, Outcome::Success, 1_000, Some(1.0)),
            record(Difficulty::Easy, Outcome::Failure, 1_000, None),
            record(Difficulty::Hard, Outcome::Success, 1_000, Some(0.5)),
        ];
        let run = summary(&records, &table);
        assert_eq!(run.overall.attempts, 3);
        assert_eq!(run.overall.successes, 2);
        assert_eq!(run.per_difficulty.len(), 2);
        let (easy_tier, easy) = &run.per_difficulty[0];
        assert_eq!(*easy_tier, Difficulty::Easy);
        assert_eq!(easy.attempts, 2);
        assert!((easy.accuracy - 0.5).abs() < 1e-9);
        let (hard_tier, hard) = &run.per_difficulty[1];
        assert_eq!(*hard_tier, Difficulty::Hard);
        assert!((hard.path_efficiency - 0.5).abs() < 1e-9);
    }

    #[test]
    fn costs_sum_over_the_records_that_have_one() {
        let mut with_cost = record(Difficulty::Easy, Outcome::Success, 1_000, Some(1.0));
        with_cost.cost_usd = Some(0.02);
        let without = record(Difficulty::Easy, Outcome::Failure, 1_000, None);
        assert!((total_cost_usd(&[with_cost, without]) - 0.02).abs() < 1e-12);
    }
}
