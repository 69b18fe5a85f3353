//! Error types surfaced by the game core.
//!
//! Only invalid construction arguments fail loudly. Expected in-game conditions such as walking
//! into a wall or an unreachable goal are reported as tagged outcomes instead; see
//! [`crate::agent::MoveOutcome`] and [`crate::pathfinding::Route`].

/// Errors raised while building a maze or a round around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[expect(
    clippy::module_name_repetitions,
    reason = "The error is re-exported at the crate root, where a bare `Error` would be ambiguous."
)]
pub enum MazeError {
    /// The requested grid is too small to hold a carved lattice, or too large to allocate.
    ///
    /// Both dimensions must lie between [`crate::generator::MIN_DIMENSION`] and
    /// [`crate::generator::MAX_DIMENSION`] cells.
    #[error("maze dimensions {width}x{height} are out of range; both sides need 3 to 1024 cells")]
    InvalidDimensions {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
}
