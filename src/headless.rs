//! Terminal-free rounds.
//!
//! A headless run plays one versus round with an idle player on a synthetic clock. Nothing here
//! touches the terminal, so it doubles as a smoke test of the simulation core.

use std::{
    fmt,
    time::{Duration, Instant},
};

use crate::{
    config::Settings,
    error::MazeError,
    game::Game,
    session::{Loss, Mode, Outcome},
};

/// Summary of a headless round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// State of the round when the run stopped.
    pub outcome: Outcome,
    /// Ticks simulated.
    pub ticks: u64,
    /// Player lives left.
    pub lives: u32,
    /// Accepted player moves.
    pub player_steps: usize,
    /// Cells travelled by the rival.
    pub rival_steps: usize,
    /// The maze, one text row per grid row.
    pub maze: String,
}

impl fmt::Display for Report {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "{}", self.maze)?;
        writeln!(formatter)?;

        let outcome = match self.outcome {
            Outcome::Ongoing => "still running",
            Outcome::Won => "player won",
            Outcome::Lost(Loss::Outpaced) => "rival reached the goal first",
            Outcome::Lost(Loss::OutOfLives) => "player ran out of lives",
        };
        writeln!(formatter, "outcome: {outcome}")?;
        writeln!(formatter, "ticks: {}", self.ticks)?;
        writeln!(formatter, "lives: {}", self.lives)?;
        writeln!(formatter, "player steps: {}", self.player_steps)?;
        write!(formatter, "rival steps: {}", self.rival_steps)
    }
}

/// Plays a versus round without input for at most `ticks` ticks.
///
/// The clock starts at the moment of the call and advances by `frame` per tick, so a seeded run
/// is fully reproducible. The run stops early once the round is over.
///
/// # Errors
///
/// Returns [`MazeError::InvalidDimensions`] if the configured maze size is out of range.
pub fn run(
    settings: Settings,
    seed: Option<u64>,
    ticks: u64,
    frame: Duration,
) -> Result<Report, MazeError> {
    let mut game = Game::new(settings, Mode::Versus, seed)?;
    let mut now = Instant::now();

    for _ in 0..ticks {
        if game.session().outcome().is_over() {
            break;
        }
        now += frame;
        game.tick(now);
    }

    let session = game.session();
    let report = Report {
        outcome: session.outcome(),
        ticks: session.ticks(),
        lives: session.player().lives(),
        player_steps: session.player().steps(),
        rival_steps: session.rival().map_or(0, |rival| rival.steps()),
        maze: session.grid().to_string(),
    };
    tracing::info!(outcome = ?report.outcome, ticks = report.ticks, "headless run finished");

    Ok(report)
}
