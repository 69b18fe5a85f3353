//! Round lifecycle: commands in, rounds replaced on restart.

use std::time::Instant;

use rand::{rngs::StdRng, Rng as _, SeedableRng as _};

use crate::{
    config::Settings,
    error::MazeError,
    grid::Direction,
    session::{Mode, Session},
};

/// Discrete command delivered by the input layer, at most one per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the player one cell.
    Move(Direction),
    /// Discard the current round and start a new one in the same mode.
    Restart,
    /// Leave the game for the main menu.
    ReturnToMenu,
    /// Leave the application.
    Quit,
}

/// What the front end should do after a command was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Keep playing.
    Continue,
    /// Show the main menu.
    Menu,
    /// Exit the application.
    Quit,
}

/// Owner of the active round.
///
/// Each restart builds a brand-new [`Session`] and bumps the generation counter, so anything
/// holding on to the old generation number can tell its round is gone.
pub struct Game {
    /// Parameters every round is built with.
    settings: Settings,
    /// Mode every round is played in.
    mode: Mode,
    /// Source of per-round seeds.
    seeds: StdRng,
    /// The active round.
    session: Session,
    /// Number of restarts so far.
    generation: u64,
}

impl Game {
    /// Starts a game with its first round.
    ///
    /// A seed makes the whole sequence of rounds reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if the configured maze size is out of range.
    pub fn new(settings: Settings, mode: Mode, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut seeds = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let session = Session::new(settings, mode, Some(seeds.gen()))?;

        Ok(Self {
            settings,
            mode,
            seeds,
            session,
            generation: 0,
        })
    }

    /// The active round.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Mode of every round of this game.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of restarts so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances the active round by one tick.
    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now);
    }

    /// Handles one command.
    ///
    /// Moves on a finished round are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a restarted round cannot be built.
    pub fn handle(&mut self, command: Command, now: Instant) -> Result<Flow, MazeError> {
        match command {
            Command::Move(direction) => {
                let _ = self.session.move_player(direction, now);
                Ok(Flow::Continue)
            }
            Command::Restart => {
                self.restart()?;
                Ok(Flow::Continue)
            }
            Command::ReturnToMenu => Ok(Flow::Menu),
            Command::Quit => Ok(Flow::Quit),
        }
    }

    /// Replaces the active round with a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an error if the new round cannot be built.
    pub fn restart(&mut self) -> Result<(), MazeError> {
        self.session = Session::new(self.settings, self.mode, Some(self.seeds.gen()))?;
        self.generation += 1;
        tracing::info!(generation = self.generation, "round restarted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Outcome;

    /// Small, wanderer-free settings so tests control every move.
    fn settings() -> Settings {
        Settings {
            width: 11,
            height: 11,
            wanderers: 0,
            ..Settings::default()
        }
    }

    #[test]
    fn test_restart_replaces_the_round() {
        let mut game = Game::new(settings(), Mode::Versus, Some(4)).expect("valid settings");
        let now = Instant::now();
        for _ in 0..40 {
            game.tick(now);
        }
        assert!(game.session().ticks() > 0);

        assert_eq!(game.handle(Command::Restart, now), Ok(Flow::Continue));

        assert_eq!(game.generation(), 1);
        assert_eq!(game.session().ticks(), 0);
        assert_eq!(game.session().mode(), Mode::Versus);
        assert_eq!(game.session().outcome(), Outcome::Ongoing);
        let rival = game.session().rival().expect("versus rounds have a rival");
        assert_eq!(rival.steps(), 0);
    }

    #[test]
    fn test_menu_and_quit_flows() {
        let mut game = Game::new(settings(), Mode::Solo, Some(4)).expect("valid settings");
        let now = Instant::now();

        assert_eq!(game.handle(Command::ReturnToMenu, now), Ok(Flow::Menu));
        assert_eq!(game.handle(Command::Quit, now), Ok(Flow::Quit));
        assert_eq!(game.generation(), 0);
    }

    #[test]
    fn test_move_commands_reach_the_player() {
        let mut game = Game::new(settings(), Mode::Solo, Some(8)).expect("valid settings");
        let now = Instant::now();
        let start = game.session().player().cell();

        assert_eq!(game.handle(Command::Move(Direction::Up), now), Ok(Flow::Continue));
        assert_eq!(game.session().player().cell(), start);

        for direction in [Direction::Right, Direction::Down] {
            let _ = game.handle(Command::Move(direction), now);
        }
        assert!(game.session().player().steps() >= 1, "(1, 1) always opens right or down");
    }

    #[test]
    fn test_seeded_games_repeat() {
        let first = Game::new(settings(), Mode::Solo, Some(21)).expect("valid settings");
        let second = Game::new(settings(), Mode::Solo, Some(21)).expect("valid settings");

        assert_eq!(first.session().grid(), second.session().grid());
    }

    #[test]
    fn test_invalid_settings_fail_loudly() {
        let tiny = Settings {
            height: 1,
            ..settings()
        };

        assert!(Game::new(tiny, Mode::Solo, None).is_err());
    }
}
