//! A terminal maze chase.
//!
//! Every round generates a fresh maze with a randomized depth-first carve, scatters wandering
//! monsters across it and drops the player at the top-left corner with three lives. In versus
//! rounds an A* rival races the player to the goal in the bottom-right corner.
//!
//! The simulation core ([`grid`], [`generator`], [`pathfinding`], [`wanderer`], [`agent`],
//! [`session`] and [`game`]) is free of any terminal code and runs on explicit time, so it can be
//! driven headlessly (see [`headless`]). The terminal front end lives behind [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod agent;
mod app;
pub mod config;
pub mod error;
mod events;
pub mod game;
pub mod generator;
pub mod grid;
pub mod headless;
pub mod logging;
pub mod pathfinding;
pub mod session;
mod types;
mod ui;
pub mod wanderer;

pub use app::App;
pub use config::Config;
pub use error::MazeError;
