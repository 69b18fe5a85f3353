//! Agents racing through the maze: the player and the pathfinding rival.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use crate::{
    grid::{Cell, Direction, Grid},
    pathfinding,
    wanderer::Wanderer,
};

/// Outcome of a requested player move.
///
/// A rejected move is reported explicitly so callers cannot mistake it for a move that simply
/// changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player stepped into the target cell without taking damage.
    Moved,
    /// The player stepped into the target cell, met a wanderer and lost a life.
    Hit,
    /// The target cell is a wall or outside the grid; nothing changed.
    Rejected,
}

impl MoveOutcome {
    /// Returns whether the player changed cell.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Moved | Self::Hit)
    }
}

/// The human-controlled agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// Cell currently occupied.
    cell: Cell,
    /// Number of accepted moves.
    steps: usize,
    /// Remaining lives; the round is lost when this reaches zero.
    lives: u32,
    /// Instant the current invulnerability window opened, if one is active.
    invulnerable_since: Option<Instant>,
    /// Length of the invulnerability window granted by a hit.
    invulnerability: Duration,
}

impl Player {
    /// Creates a player standing on `cell`.
    #[must_use]
    pub const fn new(cell: Cell, lives: u32, invulnerability: Duration) -> Self {
        Self {
            cell,
            steps: 0,
            lives,
            invulnerable_since: None,
            invulnerability,
        }
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Number of accepted moves.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Remaining lives.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Returns whether a hit would currently be ignored.
    #[must_use]
    pub const fn is_invulnerable(&self) -> bool {
        self.invulnerable_since.is_some()
    }

    /// Instant the active invulnerability window opened.
    #[must_use]
    pub const fn invulnerable_since(&self) -> Option<Instant> {
        self.invulnerable_since
    }

    /// Attempts to move one cell in `direction`.
    ///
    /// A wall or the edge of the grid rejects the move and leaves the player untouched. An
    /// accepted move counts a step and then checks the destination against every wanderer; see
    /// [`Player::strike`] for the damage rule.
    pub fn try_move(
        &mut self,
        direction: Direction,
        grid: &Grid,
        wanderers: &[Wanderer],
        now: Instant,
    ) -> MoveOutcome {
        let Some(target) = self
            .cell
            .step(direction)
            .filter(|target| grid.is_path(*target))
        else {
            return MoveOutcome::Rejected;
        };

        self.cell = target;
        self.steps += 1;

        if self.touches(wanderers) && self.strike(now) {
            MoveOutcome::Hit
        } else {
            MoveOutcome::Moved
        }
    }

    /// Returns whether any wanderer shares the player's cell.
    #[must_use]
    pub fn touches(&self, wanderers: &[Wanderer]) -> bool {
        wanderers.iter().any(|wanderer| wanderer.cell() == self.cell)
    }

    /// Applies a wanderer hit at `now`.
    ///
    /// Outside an invulnerability window the player loses one life and becomes invulnerable.
    /// Inside one, the hit is ignored. Returns whether a life was lost.
    pub fn strike(&mut self, now: Instant) -> bool {
        if self.is_invulnerable() {
            return false;
        }

        self.lives = self.lives.saturating_sub(1);
        self.invulnerable_since = Some(now);
        tracing::info!(lives = self.lives, cell = %self.cell, "player hit by a wanderer");
        true
    }

    /// Clears invulnerability once strictly more than its duration has elapsed since the hit.
    pub fn refresh(&mut self, now: Instant) {
        if let Some(since) = self.invulnerable_since {
            if now.saturating_duration_since(since) > self.invulnerability {
                self.invulnerable_since = None;
            }
        }
    }
}

/// The autonomous agent racing the player to the goal.
///
/// Its route is planned once, when the rival is created, and consumed one cell per movement
/// interval. It never replans and ignores both wanderers and the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rival {
    /// Cell currently occupied.
    cell: Cell,
    /// Number of cells travelled.
    steps: usize,
    /// Remaining cells of the planned route, next one first.
    route: VecDeque<Cell>,
    /// Ticks elapsed since the last move.
    timer: u32,
    /// Ticks between two moves.
    interval: u32,
}

impl Rival {
    /// Creates a rival at the grid's start and plans its route to the goal.
    ///
    /// If no route exists the rival simply never moves.
    #[must_use]
    pub fn new(grid: &Grid, interval: u32) -> Self {
        let route = pathfinding::find_path(grid, grid.start(), grid.goal());
        if !route.is_found() {
            tracing::warn!(goal = %grid.goal(), "rival found no route to the goal");
        }

        Self {
            cell: grid.start(),
            steps: 0,
            route: route.into_cells().into(),
            timer: 0,
            interval: interval.max(1),
        }
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Number of cells travelled.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Number of cells left on the route.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.route.len()
    }

    /// Advances the movement timer by one tick, moving to the next route cell when the interval
    /// has elapsed. Returns whether the rival moved.
    pub fn tick(&mut self) -> bool {
        self.timer = self.timer.saturating_add(1);
        if self.timer < self.interval {
            return false;
        }

        match self.route.pop_front() {
            Some(next) => {
                self.cell = next;
                self.steps += 1;
                self.timer = 0;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-second invulnerability window used throughout the tests.
    const WINDOW: Duration = Duration::from_secs(2);

    /// A small room: path cells everywhere inside the ring except the wall at (2, 2).
    fn room() -> Grid {
        Grid::from_rows(
            &["#####", "#...#", "#.#.#", "#...#", "#####"],
            Cell::new(1, 1),
            Cell::new(3, 3),
        )
    }

    #[test]
    fn test_move_into_wall_is_rejected() {
        let grid = room();
        let mut player = Player::new(grid.start(), 3, WINDOW);
        let now = Instant::now();

        assert_eq!(
            player.try_move(Direction::Up, &grid, &[], now),
            MoveOutcome::Rejected
        );
        assert_eq!(player.cell(), grid.start());
        assert_eq!(player.steps(), 0);
    }

    #[test]
    fn test_accepted_move_counts_a_step() {
        let grid = room();
        let mut player = Player::new(grid.start(), 3, WINDOW);

        let outcome = player.try_move(Direction::Right, &grid, &[], Instant::now());

        assert_eq!(outcome, MoveOutcome::Moved);
        assert!(outcome.is_accepted());
        assert_eq!(player.cell(), Cell::new(2, 1));
        assert_eq!(player.steps(), 1);
    }

    #[test]
    fn test_collision_costs_one_life_once_per_window() {
        let grid = room();
        let mut player = Player::new(grid.start(), 3, WINDOW);
        let wanderers = [
            Wanderer::new(Cell::new(2, 1), 1, Direction::Up),
            Wanderer::new(Cell::new(3, 1), 1, Direction::Up),
        ];
        let now = Instant::now();

        assert_eq!(
            player.try_move(Direction::Right, &grid, &wanderers, now),
            MoveOutcome::Hit
        );
        assert_eq!(player.lives(), 2);
        assert!(player.is_invulnerable());

        assert_eq!(
            player.try_move(Direction::Right, &grid, &wanderers, now),
            MoveOutcome::Moved
        );
        assert_eq!(player.lives(), 2);
    }

    #[test]
    fn test_invulnerability_expires_strictly_after_window() {
        let mut player = Player::new(Cell::new(1, 1), 3, WINDOW);
        let hit = Instant::now();
        assert!(player.strike(hit));

        player.refresh(hit + WINDOW);
        assert!(player.is_invulnerable(), "window is still open at exactly its length");

        player.refresh(hit + WINDOW + Duration::from_millis(1));
        assert!(!player.is_invulnerable());

        assert!(player.strike(hit + Duration::from_secs(3)));
        assert_eq!(player.lives(), 1);
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut player = Player::new(Cell::new(1, 1), 1, Duration::ZERO);
        let start = Instant::now();

        assert!(player.strike(start));
        player.refresh(start + Duration::from_millis(1));
        assert!(player.strike(start + Duration::from_millis(2)));

        assert_eq!(player.lives(), 0);
    }

    #[test]
    fn test_rival_follows_route_on_cadence() {
        let grid = room();
        let mut rival = Rival::new(&grid, 3);
        assert_eq!(rival.remaining(), 4);

        assert!(!rival.tick());
        assert!(!rival.tick());
        assert!(rival.tick());
        assert_eq!(rival.steps(), 1);
        assert_eq!(rival.cell().manhattan(grid.start()), 1);

        for _ in 0..9 {
            let _ = rival.tick();
        }

        assert_eq!(rival.cell(), grid.goal());
        assert_eq!(rival.steps(), 4);
        assert_eq!(rival.remaining(), 0);
        for _ in 0..10 {
            assert!(!rival.tick(), "a rival with no route left never moves");
        }
    }

    #[test]
    fn test_rival_without_route_stays_home() {
        let grid = Grid::from_rows(
            &["#####", "#.#.#", "#####"],
            Cell::new(1, 1),
            Cell::new(3, 1),
        );
        let mut rival = Rival::new(&grid, 1);

        for _ in 0..5 {
            assert!(!rival.tick());
        }
        assert_eq!(rival.cell(), grid.start());
        assert_eq!(rival.steps(), 0);
    }
}
