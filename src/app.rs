//! Core application state and the frame loop of the terminal front end.

use std::{io, thread, time::Instant};

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    game::{Command, Flow, Game},
    session::Mode,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the terminal game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. The simulation itself
/// lives in [`Game`]; the application only forwards commands and ticks to it.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Command-line options the application was started with.
    pub(crate) config: Config,
    /// Game in progress, if any.
    ///
    /// This field is only populated while the in-game screen is shown. Returning to the main menu
    /// drops the game, and with it the round.
    pub(crate) game: Option<Game>,
}

impl App {
    /// Creates a new application sitting on the main menu.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::SinglePlayer),
            config,
            game: None,
        }
    }

    /// Runs the main loop of the application.
    ///
    /// Each iteration is one frame: the screen is drawn, input is polled for the rest of the
    /// frame, the active round advances by one tick, and any time left over is slept away. The
    /// loop continues until the exit condition is `true`, after which the function returns to the
    /// call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`] from drawing or polling the terminal.
    /// - [`MazeError`](crate::error::MazeError) if a round cannot be built.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let frame_length = self.config.frame_duration();

        while !self.exit {
            let deadline = Instant::now() + frame_length;

            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(io::Error::other))?;
            events::handle_events(self, deadline)?;

            if let Some(game) = self.game.as_mut() {
                game.tick(Instant::now());
            }

            thread::sleep(deadline.saturating_duration_since(Instant::now()));
        }

        Ok(())
    }

    /// Starts a new game in `mode` and switches to the in-game screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured maze cannot be built.
    pub(crate) fn start(&mut self, mode: Mode) -> Result<()> {
        self.game = Some(Game::new(self.config.settings(), mode, self.config.seed)?);
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Forwards a command to the game in progress and follows the resulting flow.
    ///
    /// # Errors
    ///
    /// Returns an error if a restarted round cannot be built.
    pub(crate) fn apply(&mut self, command: Command, now: Instant) -> Result<()> {
        let Some(game) = self.game.as_mut() else {
            return Ok(());
        };

        match game.handle(command, now)? {
            Flow::Continue => {}
            Flow::Menu => {
                self.game = None;
                self.screen = Screen::MainMenu(MainMenuItem::SinglePlayer);
            }
            Flow::Quit => self.exit = true,
        }

        Ok(())
    }
}
