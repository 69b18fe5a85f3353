//! Grid occupancy model.
//!
//! This module contains the fixed-size wall/path grid every other part of the game operates on,
//! together with the coordinate and direction types used to move across it.

use std::{collections::VecDeque, fmt};

use rand::Rng;

/// Location of a single grid cell expressed as column and row coordinates.
///
/// The ordering derived here is only used to let cells live inside ordered collections such as
/// binary heaps; it carries no spatial meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column index, growing to the right.
    pub x: usize,
    /// Row index, growing downwards.
    pub y: usize,
}

impl Cell {
    /// Creates a cell from its column and row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the Manhattan distance between two cells.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the cell `distance` steps away in the given direction.
    ///
    /// This function returns [`None`] when the step would leave the non-negative coordinate space.
    /// It does not know about grid bounds; callers check those against the [`Grid`].
    #[must_use]
    pub fn step_by(self, direction: Direction, distance: usize) -> Option<Self> {
        let (dx, dy) = direction.offset();
        let x = self.x.checked_add_signed(dx.checked_mul(isize::try_from(distance).ok()?)?)?;
        let y = self.y.checked_add_signed(dy.checked_mul(isize::try_from(distance).ok()?)?)?;

        Some(Self { x, y })
    }

    /// Returns the adjacent cell in the given direction.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        self.step_by(direction, 1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// Occupancy state of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Impassable cell.
    Wall,
    /// Walkable cell.
    Path,
}

impl Tile {
    /// Returns the character used for this tile in the textual maze representation.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Path => '.',
        }
    }
}

/// Cardinal movement directions on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction, in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the `(dx, dy)` unit offset of the direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Picks one of the four directions uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..4_u8) {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }
}

/// Fixed-size wall/path occupancy model with a designated start and goal cell.
///
/// Tiles are stored row-major. Generated grids keep the invariant that `goal` is reachable from
/// `start` through 4-connected path cells; see [`crate::generator::MazeGenerator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major tile storage of `width * height` entries.
    tiles: Vec<Tile>,
    /// Cell where every agent begins a round.
    start: Cell,
    /// Cell agents race towards.
    goal: Cell,
}

impl Grid {
    /// Creates a grid with every cell set to `tile`.
    ///
    /// The start cell is fixed at `(1, 1)` and the goal at `(width - 2, height - 2)`, saturating at
    /// zero for degenerate sizes.
    #[must_use]
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
            start: Cell::new(1, 1),
            goal: Cell::new(width.saturating_sub(2), height.saturating_sub(2)),
        }
    }

    /// Builds a grid from textual rows, where `#` is a wall and any other character is a path.
    ///
    /// Rows shorter than the first one are padded with walls. This is the fixture format used by
    /// tests and by anyone wanting to hand-draw a maze.
    #[must_use]
    pub fn from_rows(rows: &[&str], start: Cell, goal: Cell) -> Self {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let height = rows.len();
        let mut grid = Self::filled(width, height, Tile::Wall);
        grid.start = start;
        grid.goal = goal;

        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().take(width).enumerate() {
                if symbol != '#' {
                    grid.set(Cell::new(x, y), Tile::Path);
                }
            }
        }

        grid
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Cell where the player and the rival begin.
    #[must_use]
    pub const fn start(&self) -> Cell {
        self.start
    }

    /// Cell that ends the round when reached.
    #[must_use]
    pub const fn goal(&self) -> Cell {
        self.goal
    }

    /// Returns whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Converts a cell into its index in the tile storage.
    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then_some(cell.y * self.width + cell.x)
    }

    /// Returns the tile at `cell`, or [`None`] when the cell is out of bounds.
    #[must_use]
    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Returns whether `cell` is in bounds and walkable.
    #[must_use]
    pub fn is_path(&self, cell: Cell) -> bool {
        self.tile(cell) == Some(Tile::Path)
    }

    /// Overwrites the tile at `cell`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, cell: Cell, tile: Tile) {
        if let Some(slot) = self
            .index(cell)
            .and_then(|index| self.tiles.get_mut(index))
        {
            *slot = tile;
        }
    }

    /// Resets every cell to a wall.
    pub fn clear(&mut self) {
        self.tiles.fill(Tile::Wall);
    }

    /// Returns the walkable 4-connected neighbours of `cell`.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| cell.step(direction))
            .filter(|neighbor| self.is_path(*neighbor))
    }

    /// Iterates over every walkable cell in row-major order.
    pub fn path_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells_of(Tile::Path)
    }

    /// Iterates over every wall cell in row-major order.
    pub fn wall_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells_of(Tile::Wall)
    }

    /// Iterates over the cells holding `kind`.
    fn cells_of(&self, kind: Tile) -> impl Iterator<Item = Cell> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| **tile == kind)
            .map(|(index, _)| Cell::new(index % self.width, index / self.width))
    }

    /// Breadth-first reachability check over 4-connected path cells.
    ///
    /// Returns `false` when `from` itself is not walkable.
    #[must_use]
    pub fn reachable(&self, from: Cell, to: Cell) -> bool {
        if !self.is_path(from) {
            return false;
        }

        let mut visited = vec![false; self.tiles.len()];
        let mut queue = VecDeque::from([from]);
        if let Some(seen) = self.index(from).and_then(|index| visited.get_mut(index)) {
            *seen = true;
        }

        while let Some(current) = queue.pop_front() {
            if current == to {
                return true;
            }

            for neighbor in self.neighbors(current) {
                if let Some(seen) = self
                    .index(neighbor)
                    .and_then(|index| visited.get_mut(index))
                {
                    if !*seen {
                        *seen = true;
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        false
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.tiles.chunks(self.width.max(1)).enumerate() {
            if index > 0 {
                writeln!(formatter)?;
            }
            for tile in row {
                write!(formatter, "{}", tile.symbol())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    #[test]
    fn test_filled_grid_places_start_and_goal() {
        let grid = Grid::filled(7, 5, Tile::Wall);

        assert_eq!(grid.start(), Cell::new(1, 1));
        assert_eq!(grid.goal(), Cell::new(5, 3));
        assert_eq!(grid.path_cells().count(), 0);
    }

    #[test]
    fn test_from_rows_round_trips_through_display() {
        let rows = ["#####", "#..##", "##..#", "#####"];
        let grid = Grid::from_rows(&rows, Cell::new(1, 1), Cell::new(3, 2));

        assert_eq!(grid.to_string(), rows.join("\n"));
        assert!(grid.is_path(Cell::new(2, 1)));
        assert!(!grid.is_path(Cell::new(0, 0)));
    }

    #[test]
    fn test_path_and_wall_cells_partition_the_grid() {
        let rows = ["####", "#..#", "####"];
        let grid = Grid::from_rows(&rows, Cell::new(1, 1), Cell::new(2, 1));

        let paths: Vec<Cell> = grid.path_cells().collect();
        assert_eq!(paths, vec![Cell::new(1, 1), Cell::new(2, 1)]);
        assert_eq!(grid.wall_cells().count(), 10);
        assert!(grid.wall_cells().all(|cell| !grid.is_path(cell)));
    }

    #[test]
    fn test_out_of_bounds_is_never_path() {
        let grid = Grid::filled(3, 3, Tile::Path);

        assert!(grid.is_path(Cell::new(2, 2)));
        assert!(!grid.is_path(Cell::new(3, 0)));
        assert_eq!(grid.tile(Cell::new(0, 3)), None);
    }

    #[test]
    fn test_set_ignores_out_of_bounds_writes() {
        let mut grid = Grid::filled(3, 3, Tile::Wall);
        grid.set(Cell::new(5, 5), Tile::Path);

        assert_eq!(grid.path_cells().count(), 0);
    }

    #[test]
    fn test_step_stops_at_zero() {
        let origin = Cell::new(0, 0);

        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(Cell::new(1, 0)));
        assert_eq!(
            Cell::new(3, 3).step_by(Direction::Up, 2),
            Some(Cell::new(3, 1))
        );
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(Cell::new(1, 1).manhattan(Cell::new(4, 5)), 7);
        assert_eq!(Cell::new(4, 5).manhattan(Cell::new(1, 1)), 7);
    }

    #[test]
    fn test_neighbors_only_yield_paths() {
        let grid = Grid::from_rows(&["###", "#..", "#.#"], Cell::new(1, 1), Cell::new(1, 2));
        let mut neighbors: Vec<Cell> = grid.neighbors(Cell::new(1, 1)).collect();
        neighbors.sort();

        assert_eq!(neighbors, vec![Cell::new(1, 2), Cell::new(2, 1)]);
    }

    #[test]
    fn test_reachable_through_corridor() {
        let grid = Grid::from_rows(
            &["#####", "#...#", "###.#", "#...#", "#####"],
            Cell::new(1, 1),
            Cell::new(1, 3),
        );

        assert!(grid.reachable(grid.start(), grid.goal()));
    }

    #[test]
    fn test_unreachable_behind_wall() {
        let grid = Grid::from_rows(
            &["#####", "#.#.#", "#####"],
            Cell::new(1, 1),
            Cell::new(3, 1),
        );

        assert!(!grid.reachable(grid.start(), grid.goal()));
        assert!(!grid.reachable(Cell::new(0, 0), grid.goal()));
    }

    #[test]
    fn test_random_direction_covers_all() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];

        for _ in 0..200 {
            match Direction::random(&mut rng) {
                Direction::Up => seen[0] = true,
                Direction::Right => seen[1] = true,
                Direction::Down => seen[2] = true,
                Direction::Left => seen[3] = true,
            }
        }

        assert!(seen.iter().all(|flag| *flag), "every direction should be drawn");
    }
}
