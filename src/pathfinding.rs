//! Shortest-path search over the maze grid.
//!
//! This module implements A* over 4-connected path cells with unit edge costs and a Manhattan
//! distance heuristic. The heuristic is admissible and consistent on such a grid, so the returned
//! route is always a shortest one.
//!
//! Among several shortest routes the one returned depends on the heap's tie-break order between
//! equal f-scores, which is unspecified. Callers may rely on the route length, not on the exact
//! cells chosen.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use crate::grid::{Cell, Grid};

/// Result of a path search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// A shortest route exists. The cells exclude the origin and end at the destination, so the
    /// sequence is empty when both are the same cell.
    Found(Vec<Cell>),
    /// The destination cannot be reached from the origin.
    NotFound,
}

impl Route {
    /// Returns whether a route was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the number of steps of the route, or [`None`] when no route exists.
    #[must_use]
    pub fn steps(&self) -> Option<usize> {
        match self {
            Self::Found(cells) => Some(cells.len()),
            Self::NotFound => None,
        }
    }

    /// Consumes the route into its cells; an unreachable destination yields no cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<Cell> {
        match self {
            Self::Found(cells) => cells,
            Self::NotFound => Vec::new(),
        }
    }
}

/// Finds a shortest route from `from` to `to` over walkable cells.
///
/// An unreachable, walled or out-of-bounds destination produces [`Route::NotFound`]; this is an
/// expected outcome rather than an error.
#[must_use]
pub fn find_path(grid: &Grid, from: Cell, to: Cell) -> Route {
    if from == to {
        return Route::Found(Vec::new());
    }
    if !grid.is_path(to) {
        return Route::NotFound;
    }

    let mut open = BinaryHeap::from([Reverse((from.manhattan(to), 0_usize, from))]);
    let mut best_cost = HashMap::from([(from, 0_usize)]);
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();

    while let Some(Reverse((_, cost, current))) = open.pop() {
        if current == to {
            return Route::Found(reconstruct(&came_from, from, to));
        }

        // Entries superseded by a cheaper push are skipped instead of removed from the heap.
        if best_cost.get(&current).is_some_and(|best| cost > *best) {
            continue;
        }

        for neighbor in grid.neighbors(current) {
            let tentative = cost + 1;
            if best_cost
                .get(&neighbor)
                .is_none_or(|known| tentative < *known)
            {
                let _ = came_from.insert(neighbor, current);
                let _ = best_cost.insert(neighbor, tentative);
                open.push(Reverse((
                    tentative + neighbor.manhattan(to),
                    tentative,
                    neighbor,
                )));
            }
        }
    }

    Route::NotFound
}

/// Walks the back-pointers from `to` to `from` and returns the route in travel order, excluding
/// `from`.
fn reconstruct(came_from: &HashMap<Cell, Cell>, from: Cell, to: Cell) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut current = to;

    while current != from {
        cells.push(current);
        match came_from.get(&current) {
            Some(previous) => current = *previous,
            None => break,
        }
    }

    cells.reverse();
    cells
}
