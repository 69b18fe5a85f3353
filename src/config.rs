//! Command-line configuration and simulation settings.
//!
//! [`Config`] is what the user types; [`Settings`] is the subset the simulation core consumes, so
//! the core never depends on the argument parser.

use std::{env, path::PathBuf, time::Duration};

use clap::Parser;

/// Command-line options of the game.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Maze width in cells (3 to 1024)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(3..=1024))]
    pub width: u16,

    /// Maze height in cells (3 to 1024)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(3..=1024))]
    pub height: u16,

    /// Number of wandering monsters
    #[arg(long, default_value_t = 5)]
    pub wanderers: usize,

    /// Random seed for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frame length in milliseconds; one simulation tick runs per frame
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Directory for the log file (defaults to the system temporary directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Run a versus round without a terminal UI and print the result
    #[arg(long)]
    pub headless: bool,

    /// Tick budget of a headless round
    #[arg(long, default_value_t = 3600)]
    pub ticks: u64,
}

impl Config {
    /// Returns the simulation settings described by these options.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            width: self.width.into(),
            height: self.height.into(),
            wanderers: self.wanderers,
            ..Settings::default()
        }
    }

    /// Returns the length of one frame.
    #[must_use]
    pub const fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Returns the directory the log file is written to.
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(env::temp_dir)
    }
}

/// Parameters of a round.
///
/// Cadences are expressed in simulation ticks, one tick per rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Maze width in cells.
    pub width: usize,
    /// Maze height in cells.
    pub height: usize,
    /// Number of wanderers placed at the start of a round.
    pub wanderers: usize,
    /// Wanderers spawn strictly farther than this Manhattan distance from the start.
    pub spawn_distance: usize,
    /// Ticks between two wanderer moves; the collision sweep runs on the same cadence.
    pub wanderer_interval: u32,
    /// Ticks between two rival moves.
    pub rival_interval: u32,
    /// Per-move probability that a wanderer turns to a random heading.
    pub turn_probability: f64,
    /// Lives the player starts with.
    pub lives: u32,
    /// Length of the invulnerability window after a hit.
    pub invulnerability: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            wanderers: 5,
            spawn_distance: 10,
            wanderer_interval: 15,
            rival_interval: 30,
            turn_probability: 0.1,
            lives: 3,
            invulnerability: Duration::from_secs(2),
        }
    }
}
