//! Procedural maze generation.
//!
//! Mazes are carved with a randomized depth-first search over the odd-indexed cell lattice, which
//! yields a spanning tree between the start and every other lattice cell. A few extra openings
//! are then punched just inside the outer ring to create shortcuts, and a final reachability check
//! regenerates the maze from scratch if the goal ever ends up cut off.

use std::collections::HashSet;

use rand::{rngs::StdRng, seq::SliceRandom as _, Rng as _, SeedableRng as _};

use crate::{
    error::MazeError,
    grid::{Cell, Direction, Grid, Tile},
};

/// Smallest accepted width or height of a generated maze.
pub const MIN_DIMENSION: usize = 3;

/// Largest accepted width or height of a generated maze.
pub const MAX_DIMENSION: usize = 1024;

/// Number of extra openings punched next to the outer ring after carving.
pub const EXTRA_OPENINGS: usize = 3;

/// Maze generator backed by a seedable random number generator.
///
/// Two generators built from the same seed produce the same sequence of mazes.
#[expect(
    clippy::module_name_repetitions,
    reason = "The maze prefix reads better at call sites than a bare `Generator`."
)]
pub struct MazeGenerator {
    /// Source of randomness for carving and openings.
    rng: StdRng,
}

impl MazeGenerator {
    /// Creates a generator, seeded for reproducible output or from entropy when no seed is given.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
        }
    }

    /// Generates a maze of the given size whose goal is reachable from its start.
    ///
    /// The start sits at `(1, 1)` and the goal at `(width - 2, height - 2)`. Generation is retried
    /// until the reachability check passes.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either dimension lies outside
    /// [`MIN_DIMENSION`]`..=`[`MAX_DIMENSION`].
    pub fn generate(&mut self, width: usize, height: usize) -> Result<Grid, MazeError> {
        self.build(width, height, Self::carve)
    }

    /// Runs the generate-check-regenerate loop with the given carving pass.
    fn build<F>(&mut self, width: usize, height: usize, mut carve: F) -> Result<Grid, MazeError>
    where
        F: FnMut(&mut Self, &mut Grid) -> usize,
    {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        let mut grid = Grid::filled(width, height, Tile::Wall);
        let mut attempts: usize = 0;

        loop {
            attempts += 1;
            grid.clear();

            let passages = carve(self, &mut grid);
            Self::anchor_goal(&mut grid);
            self.open_boundary(&mut grid);

            if grid.reachable(grid.start(), grid.goal()) {
                tracing::debug!(width, height, passages, attempts, "maze generated");
                return Ok(grid);
            }

            tracing::warn!(attempts, "goal unreachable from start, regenerating maze");
        }
    }

    /// Carves a perfect maze over the odd lattice with a randomized depth-first search.
    ///
    /// Starting from the grid's start cell, each step picks a random unvisited lattice cell two
    /// steps away, opens the wall between them and continues from there, backtracking whenever a
    /// cell has no unvisited lattice neighbour left. Lattice neighbours are clamped to
    /// `width - 2` and `height - 2` so the outer ring is never touched.
    ///
    /// Returns the number of connecting walls removed, which for a spanning tree is one less than
    /// the number of lattice cells.
    pub(crate) fn carve(&mut self, grid: &mut Grid) -> usize {
        let start = grid.start();
        let max_x = grid.width() - 2;
        let max_y = grid.height() - 2;

        grid.set(start, Tile::Path);
        let mut visited = HashSet::from([start]);
        let mut stack = vec![start];
        let mut passages = 0;

        while let Some(&current) = stack.last() {
            let candidates: Vec<(Direction, Cell)> = Direction::ALL
                .into_iter()
                .filter_map(|direction| {
                    current
                        .step_by(direction, 2)
                        .filter(|next| {
                            next.x <= max_x && next.y <= max_y && !visited.contains(next)
                        })
                        .map(|next| (direction, next))
                })
                .collect();

            if let Some(&(direction, next)) = candidates.choose(&mut self.rng) {
                if let Some(wall) = current.step(direction) {
                    grid.set(wall, Tile::Path);
                }
                grid.set(next, Tile::Path);
                let _ = visited.insert(next);
                stack.push(next);
                passages += 1;
            } else {
                let _ = stack.pop();
            }
        }

        passages
    }

    /// Connects a goal that falls off the odd lattice to the neighbouring lattice cell.
    ///
    /// With an even width or height the goal has an even coordinate and is never visited by the
    /// carver. A corridor of at most two cells, stepping left for an even column and up for an even
    /// row, links it to a lattice cell without introducing a cycle.
    fn anchor_goal(grid: &mut Grid) {
        let mut cell = grid.goal();
        if grid.is_path(cell) {
            return;
        }

        grid.set(cell, Tile::Path);
        if cell.x % 2 == 0 {
            if let Some(next) = cell.step(Direction::Left) {
                cell = next;
                grid.set(cell, Tile::Path);
            }
        }
        if cell.y % 2 == 0 {
            if let Some(next) = cell.step(Direction::Up) {
                grid.set(next, Tile::Path);
            }
        }
    }

    /// Punches [`EXTRA_OPENINGS`] random openings on the cells just inside the outer ring.
    ///
    /// For each opening an edge is picked uniformly, then a coordinate along it. The opened cell
    /// may or may not join the main carved component.
    fn open_boundary(&mut self, grid: &mut Grid) {
        let max_x = grid.width() - 2;
        let max_y = grid.height() - 2;

        for _ in 0..EXTRA_OPENINGS {
            let cell = match Direction::random(&mut self.rng) {
                Direction::Up => Cell::new(self.rng.gen_range(1..=max_x), 1),
                Direction::Right => Cell::new(max_x, self.rng.gen_range(1..=max_y)),
                Direction::Down => Cell::new(self.rng.gen_range(1..=max_x), max_y),
                Direction::Left => Cell::new(1, self.rng.gen_range(1..=max_y)),
            };

            grid.set(cell, Tile::Path);
        }
    }
}
