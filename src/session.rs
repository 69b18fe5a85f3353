//! A single round of the game.
//!
//! The [`Session`] exclusively owns the maze, the wanderers and the agents of one round and
//! advances them synchronously, one tick per frame. Restarting a round means building a new
//! session; nothing is carried over from the old one.

use std::time::Instant;

use rand::{rngs::StdRng, Rng as _, SeedableRng as _};

use crate::{
    agent::{MoveOutcome, Player, Rival},
    config::Settings,
    error::MazeError,
    generator::MazeGenerator,
    grid::{Cell, Direction, Grid},
    wanderer::{self, Wanderer},
};

/// Whether the player races alone or against the rival.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Player, maze and wanderers only.
    Solo,
    /// A pathfinding rival races the player to the goal.
    Versus,
}

/// Reason a round was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Loss {
    /// Wanderers took the player's last life.
    OutOfLives,
    /// The rival reached the goal first.
    Outpaced,
}

/// State of a round.
///
/// A round leaves [`Outcome::Ongoing`] exactly once and then stays put until it is replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The round is still being played.
    Ongoing,
    /// The player reached the goal.
    Won,
    /// The round was lost.
    Lost(Loss),
}

impl Outcome {
    /// Returns whether the round has ended.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Read-only view of a round, handed to whatever renders it.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    /// The maze.
    pub grid: &'a Grid,
    /// Cells occupied by wanderers, possibly with repeats.
    pub wanderers: Vec<Cell>,
    /// Cell occupied by the player.
    pub player: Cell,
    /// Accepted player moves.
    pub player_steps: usize,
    /// Remaining player lives.
    pub lives: u32,
    /// Instant the player's invulnerability window opened, if one is active.
    pub invulnerable_since: Option<Instant>,
    /// Cell occupied by the rival, in versus rounds.
    pub rival: Option<Cell>,
    /// Cells travelled by the rival, in versus rounds.
    pub rival_steps: Option<usize>,
    /// State of the round.
    pub outcome: Outcome,
}

/// One round: a maze, its wanderers, the player and an optional rival.
pub struct Session {
    /// Parameters the round was built with.
    settings: Settings,
    /// Solo or versus.
    mode: Mode,
    /// The maze.
    grid: Grid,
    /// Wandering obstacles.
    wanderers: Vec<Wanderer>,
    /// The human-controlled agent.
    player: Player,
    /// The pathfinding rival, present in versus rounds.
    rival: Option<Rival>,
    /// State of the round.
    outcome: Outcome,
    /// Ticks simulated so far.
    ticks: u64,
    /// Ticks since the wanderers last moved.
    wanderer_timer: u32,
    /// Randomness driving the wanderers.
    rng: StdRng,
}

impl Session {
    /// Builds a fresh round: generates a maze, places the wanderers and creates the agents.
    ///
    /// The same seed, settings and mode always produce the same round.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if the configured maze size is out of range.
    pub fn new(settings: Settings, mode: Mode, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let grid = MazeGenerator::new(Some(rng.gen())).generate(settings.width, settings.height)?;
        let wanderers = wanderer::spawn_wanderers(
            &grid,
            settings.wanderers,
            settings.spawn_distance,
            &mut rng,
        );

        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            wanderers = wanderers.len(),
            ?mode,
            "round started"
        );

        Ok(Self::from_parts(settings, mode, grid, wanderers, rng))
    }

    /// Assembles a round around an existing maze and wanderer list.
    ///
    /// A maze whose start is its goal, as in the smallest 3x3 grid, yields a round that is
    /// already won.
    pub(crate) fn from_parts(
        settings: Settings,
        mode: Mode,
        grid: Grid,
        wanderers: Vec<Wanderer>,
        rng: StdRng,
    ) -> Self {
        let player = Player::new(grid.start(), settings.lives, settings.invulnerability);
        let rival = match mode {
            Mode::Solo => None,
            Mode::Versus => Some(Rival::new(&grid, settings.rival_interval)),
        };

        let outcome = if player.cell() == grid.goal() {
            Outcome::Won
        } else {
            Outcome::Ongoing
        };

        Self {
            settings,
            mode,
            grid,
            wanderers,
            player,
            rival,
            outcome,
            ticks: 0,
            wanderer_timer: 0,
            rng,
        }
    }

    /// Solo or versus.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The maze of this round.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The wanderers of this round.
    #[must_use]
    pub fn wanderers(&self) -> &[Wanderer] {
        &self.wanderers
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The rival, in versus rounds.
    #[must_use]
    pub const fn rival(&self) -> Option<&Rival> {
        self.rival.as_ref()
    }

    /// State of the round.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Ticks simulated so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the round by one tick.
    ///
    /// In order: the wanderers move when their cadence is due, the rival advances its own
    /// cadence, the player's invulnerability expires if its window has passed, and, on ticks where
    /// the wanderers moved, the player is swept for collisions so a standing player can still be
    /// caught. A finished round no longer changes.
    pub fn tick(&mut self, now: Instant) {
        if self.outcome.is_over() {
            return;
        }

        self.ticks += 1;
        self.wanderer_timer = self.wanderer_timer.saturating_add(1);
        let wanderers_due = self.wanderer_timer >= self.settings.wanderer_interval;
        if wanderers_due {
            self.wanderer_timer = 0;
            for wanderer in &mut self.wanderers {
                wanderer.advance(&self.grid, self.settings.turn_probability, &mut self.rng);
            }
        }

        if let Some(rival) = self.rival.as_mut() {
            let _ = rival.tick();
        }

        self.player.refresh(now);

        if wanderers_due
            && self.player.touches(&self.wanderers)
            && self.player.strike(now)
            && self.player.lives() == 0
        {
            self.finish(Outcome::Lost(Loss::OutOfLives));
            return;
        }

        if self
            .rival
            .as_ref()
            .is_some_and(|rival| rival.cell() == self.grid.goal())
        {
            self.finish(Outcome::Lost(Loss::Outpaced));
        }
    }

    /// Applies a player move request.
    ///
    /// Returns [`None`] once the round is over, as finished rounds accept no input. Otherwise the
    /// move outcome is returned and the round ends if the move cost the last life or reached the
    /// goal.
    pub fn move_player(&mut self, direction: Direction, now: Instant) -> Option<MoveOutcome> {
        if self.outcome.is_over() {
            return None;
        }

        let outcome = self
            .player
            .try_move(direction, &self.grid, &self.wanderers, now);

        if outcome == MoveOutcome::Hit && self.player.lives() == 0 {
            self.finish(Outcome::Lost(Loss::OutOfLives));
        } else if outcome.is_accepted() && self.player.cell() == self.grid.goal() {
            self.finish(Outcome::Won);
        }

        Some(outcome)
    }

    /// Captures a read-only view of the round.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            wanderers: self.wanderers.iter().map(Wanderer::cell).collect(),
            player: self.player.cell(),
            player_steps: self.player.steps(),
            lives: self.player.lives(),
            invulnerable_since: self.player.invulnerable_since(),
            rival: self.rival.as_ref().map(Rival::cell),
            rival_steps: self.rival.as_ref().map(Rival::steps),
            outcome: self.outcome,
        }
    }

    /// Ends an ongoing round.
    fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_over() {
            return;
        }

        self.outcome = outcome;
        tracing::info!(
            ?outcome,
            ticks = self.ticks,
            player_steps = self.player.steps(),
            rival_steps = self.rival.as_ref().map(Rival::steps),
            "round over"
        );
    }
}
