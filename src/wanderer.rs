//! Wandering obstacles.
//!
//! Wanderers are the maze's monsters: independent random walkers confined to path cells. They
//! never interact with one another, so several of them may share a cell.

use rand::{seq::SliceRandom as _, Rng};

use crate::grid::{Cell, Direction, Grid};

/// A random-walking obstacle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wanderer {
    /// Cell currently occupied.
    cell: Cell,
    /// Number of cells attempted per movement tick, either 1 or 2.
    speed: u8,
    /// Direction the next attempted step goes in.
    heading: Direction,
}

impl Wanderer {
    /// Creates a wanderer at `cell`.
    ///
    /// The speed is clamped to the supported range of one or two cells per movement tick.
    #[must_use]
    pub fn new(cell: Cell, speed: u8, heading: Direction) -> Self {
        Self {
            cell,
            speed: speed.clamp(1, 2),
            heading,
        }
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Number of cells attempted per movement tick.
    #[must_use]
    pub const fn speed(&self) -> u8 {
        self.speed
    }

    /// Current heading.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Advances the wanderer by one movement tick.
    ///
    /// With probability `turn_probability` the wanderer first turns to a random heading. It then
    /// tries to step `speed` times along its heading. The first blocked step (a wall or the edge of
    /// the grid) picks a new random heading and ends the movement for this tick.
    pub fn advance<R: Rng + ?Sized>(&mut self, grid: &Grid, turn_probability: f64, rng: &mut R) {
        if rng.gen_bool(turn_probability.clamp(0.0, 1.0)) {
            self.heading = Direction::random(rng);
        }

        for _ in 0..self.speed {
            match self.cell.step(self.heading) {
                Some(next) if grid.is_path(next) => self.cell = next,
                _ => {
                    self.heading = Direction::random(rng);
                    break;
                }
            }
        }
    }
}

/// Places `count` wanderers on random path cells of the grid.
///
/// Eligible cells are path cells other than the start and the goal whose Manhattan distance from
/// the start is strictly greater than `min_distance`. When a small maze has no such cell the
/// distance requirement is dropped; when it has no eligible cell at all, no wanderer is placed.
/// Each wanderer gets a random speed of one or two and a random heading.
pub fn spawn_wanderers<R: Rng + ?Sized>(
    grid: &Grid,
    count: usize,
    min_distance: usize,
    rng: &mut R,
) -> Vec<Wanderer> {
    let start = grid.start();
    let goal = grid.goal();
    let open: Vec<Cell> = grid
        .path_cells()
        .filter(|cell| *cell != start && *cell != goal)
        .collect();
    let distant: Vec<Cell> = open
        .iter()
        .copied()
        .filter(|cell| cell.manhattan(start) > min_distance)
        .collect();

    let candidates = if distant.is_empty() {
        tracing::debug!(
            min_distance,
            "no path cell far enough from the start, relaxing wanderer placement"
        );
        &open
    } else {
        &distant
    };

    let wanderers: Vec<Wanderer> = (0..count)
        .map_while(|_| {
            let cell = *candidates.choose(&mut *rng)?;
            Some(Wanderer::new(
                cell,
                rng.gen_range(1..=2),
                Direction::random(&mut *rng),
            ))
        })
        .collect();

    tracing::debug!(requested = count, spawned = wanderers.len(), "wanderers spawned");
    wanderers
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::generator::MazeGenerator;

    /// A horizontal corridor of five path cells between x=1 and x=5.
    fn corridor() -> Grid {
        Grid::from_rows(
            &["#######", "#.....#", "#######"],
            Cell::new(1, 1),
            Cell::new(5, 1),
        )
    }

    #[test]
    fn test_spawned_wanderers_respect_distance() {
        let grid = MazeGenerator::new(Some(9))
            .generate(30, 30)
            .expect("dimensions are valid");
        let mut rng = StdRng::seed_from_u64(9);

        let wanderers = spawn_wanderers(&grid, 5, 10, &mut rng);

        assert_eq!(wanderers.len(), 5);
        for wanderer in &wanderers {
            assert!(grid.is_path(wanderer.cell()));
            assert_ne!(wanderer.cell(), grid.start());
            assert_ne!(wanderer.cell(), grid.goal());
            assert!(wanderer.cell().manhattan(grid.start()) > 10);
            assert!((1..=2).contains(&wanderer.speed()));
        }
    }

    #[test]
    fn test_small_maze_relaxes_distance() {
        let grid = corridor();
        let mut rng = StdRng::seed_from_u64(1);

        let wanderers = spawn_wanderers(&grid, 3, 10, &mut rng);

        assert_eq!(wanderers.len(), 3);
        for wanderer in wanderers {
            assert!((2..=4).contains(&wanderer.cell().x));
        }
    }

    #[test]
    fn test_no_eligible_cell_spawns_nothing() {
        let grid = Grid::from_rows(&["####", "#..#", "####"], Cell::new(1, 1), Cell::new(2, 1));
        let mut rng = StdRng::seed_from_u64(1);

        assert!(spawn_wanderers(&grid, 4, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_advance_moves_along_heading() {
        let grid = corridor();
        let mut rng = StdRng::seed_from_u64(2);
        let mut wanderer = Wanderer::new(Cell::new(1, 1), 2, Direction::Right);

        wanderer.advance(&grid, 0.0, &mut rng);

        assert_eq!(wanderer.cell(), Cell::new(3, 1));
        assert_eq!(wanderer.heading(), Direction::Right);
    }

    #[test]
    fn test_blocked_step_stops_the_tick() {
        let grid = corridor();
        let mut rng = StdRng::seed_from_u64(3);
        let mut wanderer = Wanderer::new(Cell::new(4, 1), 2, Direction::Right);

        wanderer.advance(&grid, 0.0, &mut rng);

        // One step reaches the end of the corridor, the second is blocked by the wall.
        assert_eq!(wanderer.cell(), Cell::new(5, 1));
    }

    #[test]
    fn test_wall_facing_wanderer_stays_put() {
        let grid = corridor();
        let mut rng = StdRng::seed_from_u64(4);
        let mut wanderer = Wanderer::new(Cell::new(3, 1), 1, Direction::Up);

        wanderer.advance(&grid, 0.0, &mut rng);

        assert_eq!(wanderer.cell(), Cell::new(3, 1));
    }

    #[test]
    fn test_wanderers_stay_on_paths() {
        let grid = MazeGenerator::new(Some(11))
            .generate(21, 21)
            .expect("dimensions are valid");
        let mut rng = StdRng::seed_from_u64(11);
        let mut wanderers = spawn_wanderers(&grid, 6, 10, &mut rng);

        for _ in 0..500 {
            for wanderer in &mut wanderers {
                wanderer.advance(&grid, 0.1, &mut rng);
                assert!(grid.is_path(wanderer.cell()), "wanderer left the paths");
            }
        }
    }

    #[test]
    fn test_speed_is_clamped() {
        assert_eq!(Wanderer::new(Cell::new(1, 1), 0, Direction::Up).speed(), 1);
        assert_eq!(Wanderer::new(Cell::new(1, 1), 9, Direction::Up).speed(), 2);
    }
}
