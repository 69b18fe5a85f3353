//! This crate contains the source code for the binary for the game maze-chase.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use maze_chase::{headless, logging, App, Config};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    let _guard = logging::init(&config.log_dir())?;

    if config.headless {
        let report = headless::run(
            config.settings(),
            config.seed,
            config.ticks,
            config.frame_duration(),
        )?;
        println!("{report}");

        return Ok(());
    }

    let mut terminal = ratatui::init();
    let result = App::new(config).run(&mut terminal);
    ratatui::restore();

    result
}
