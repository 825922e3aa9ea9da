/*
cli_options.rs

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

//! Process command-line options.
//!
//! The `mazebench` binary is a developer tool around the engine: it
//! generates sample mazes for a difficulty tier and prints them as JSON,
//! one document per maze, for inspection or for seeding a benchmark
//! instance.
//!
//! # Examples
//!
//! List the difficulty tiers:
//!
//! ```text
//! $ mazebench --ls
//! simple (5-6 x 5-6, min shortest path 8)
//! ...
//! ```
//!
//! Generate three hard mazes with the spine-first algorithm and print
//! generation statistics:
//!
//! ```text
//! $ mazebench -d hard -a spine-first -c 3 --summary
//! ```

use clap::Parser;
use log::debug;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use mazebench::generator::profile::{Difficulty, DifficultyProfile, default_profiles};
use mazebench::generator::{self, Algorithm};
use mazebench::maze::GeneratedMaze;

/// Generate random benchmark mazes.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// List the difficulty tiers and their profiles
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Difficulty tier to generate mazes for
    #[arg(value_enum, short, long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Generation algorithm
    #[arg(value_enum, short, long, default_value_t = Algorithm::SpineFirst)]
    algorithm: Algorithm,

    /// Number of mazes to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Maximum generation attempts per maze
    #[arg(short, long, default_value_t = 50)]
    max_attempts: usize,

    /// JSON file with difficulty profiles replacing the bundled defaults
    #[arg(short, long)]
    profiles: Option<PathBuf>,

    /// Print some statistics after generating the mazes
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(long, default_value_t = false)]
    debug: bool,
}

/// Parse the command-line options, run the requested command, and return
/// the process exit code.
pub fn run() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let mut profiles: HashMap<Difficulty, DifficultyProfile> = default_profiles();

    //
    // Load replacement profiles
    //
    if let Some(path) = &args.profiles {
        let text: String = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Cannot read {}: {e}", path.display());
                return 1;
            }
        };
        let overrides: HashMap<Difficulty, DifficultyProfile> =
            match serde_json::from_str(&text) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Cannot parse {}: {e}", path.display());
                    return 1;
                }
            };
        profiles.extend(overrides);
    }

    //
    // List the difficulty tiers
    //
    if args.ls {
        for difficulty in Difficulty::ALL {
            let p: &DifficultyProfile = &profiles[&difficulty];
            println!(
                "{difficulty} ({}-{} x {}-{}, min shortest path {})",
                p.min_width, p.max_width, p.min_height, p.max_height, p.min_shortest_path
            );
        }
        return 0;
    }

    //
    // Generate the requested mazes
    //
    let profile: &DifficultyProfile = &profiles[&args.difficulty];
    let mut produced: usize = 0;
    let mut errors: usize = 0;
    let mut total_shortest: usize = 0;

    for i in 0..args.count {
        debug!("Maze {i}");
        match generator::generate(args.algorithm, profile, args.max_attempts) {
            Some(maze) => {
                produced += 1;
                total_shortest += maze.shortest_path as usize;
                print_maze(&maze);
            }
            None => {
                // The retry budget ran out; this is an explicit failure,
                // the caller can raise --max-attempts.
                errors += 1;
                debug!("ERROR generating maze {i}");
            }
        }
    }

    //
    // Print some stats
    //
    if args.summary {
        println!(
            "
           produced = {}
             errors = {}
  avg shortest path = {}",
            produced,
            errors,
            if produced > 0 { total_shortest / produced } else { 0 }
        );
    }
    u8::from(produced < args.count)
}

/// Print a maze as a JSON document on stdout.
fn print_maze(maze: &GeneratedMaze) {
    match serde_json::to_string_pretty(maze) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Cannot serialize the maze: {e}"),
    }
}
