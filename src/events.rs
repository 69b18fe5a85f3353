//! Event handling functions for user input and application state updates.

use std::time::Instant;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    game::Command,
    grid::Direction,
    session::Mode,
    types::{MainMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function waits for a keyboard event until `deadline` at the latest, so polling never eats
/// into the next frame. At most one key press is handled per call, which keeps player input to one
/// command per frame.
///
/// # Errors
///
/// Fails if the terminal cannot be polled or a round cannot be built.
pub(crate) fn handle_events(app: &mut App, deadline: Instant) -> Result<()> {
    if event::poll(deadline.saturating_duration_since(Instant::now()))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code, Instant::now())?;
            }
        }
    }

    Ok(())
}

/// Dispatches one key press to the handler of the current screen.
///
/// # Errors
///
/// Fails if a round cannot be built.
pub(crate) fn handle_key(app: &mut App, code: KeyCode, now: Instant) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => handle_menu_key(app, item, code),
        Screen::InGame => match command_for(code) {
            Some(command) => app.apply(command, now),
            None => Ok(()),
        },
    }
}

/// Translates an in-game key into a game command.
///
/// Arrows and WASD move the player, `r` restarts, `m` returns to the menu, and `q` or Esc quits.
pub(crate) const fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Move(Direction::Up)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Move(Direction::Right)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Move(Direction::Left)),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('m') => Some(Command::ReturnToMenu),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Handles main menu navigation.
///
/// `j`/`k` (or the arrows) move the highlight, `l` (or Enter) selects it, and `1`/`2` jump straight
/// into a single player or versus game.
fn handle_menu_key(app: &mut App, item: MainMenuItem, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::MainMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::MainMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item.mode() {
            Some(mode) => app.start(mode)?,
            None => app.exit = true,
        },
        KeyCode::Char('1') => app.start(Mode::Solo)?,
        KeyCode::Char('2') => app.start(Mode::Versus)?,
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::config::Config;

    /// Creates an app over a small, seeded maze without wanderers.
    fn create_test_app() -> App {
        App::new(Config::parse_from([
            "maze-chase",
            "--width",
            "11",
            "--height",
            "11",
            "--wanderers",
            "0",
            "--seed",
            "12",
        ]))
    }

    #[test]
    fn test_command_mapping() {
        assert_eq!(
            command_for(KeyCode::Char('w')),
            Some(Command::Move(Direction::Up))
        );
        assert_eq!(
            command_for(KeyCode::Left),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(command_for(KeyCode::Char('r')), Some(Command::Restart));
        assert_eq!(command_for(KeyCode::Char('m')), Some(Command::ReturnToMenu));
        assert_eq!(command_for(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(command_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = create_test_app();
        let now = Instant::now();

        handle_key(&mut app, KeyCode::Char('j'), now).expect("navigation never fails");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Versus));

        handle_key(&mut app, KeyCode::Char('j'), now).expect("navigation never fails");
        handle_key(&mut app, KeyCode::Char('j'), now).expect("navigation never fails");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        handle_key(&mut app, KeyCode::Char('k'), now).expect("navigation never fails");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Versus));
    }

    #[test]
    fn test_menu_select_starts_game() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Versus);

        handle_key(&mut app, KeyCode::Char('l'), Instant::now()).expect("valid configuration");

        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.game.as_ref().map(crate::game::Game::mode), Some(Mode::Versus));
    }

    #[test]
    fn test_menu_shortcuts_start_games() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('1'), Instant::now()).expect("valid configuration");

        assert_eq!(app.game.as_ref().map(crate::game::Game::mode), Some(Mode::Solo));
    }

    #[test]
    fn test_menu_quit_selection_exits() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Quit);

        handle_key(&mut app, KeyCode::Enter, Instant::now()).expect("quitting never fails");

        assert!(app.exit);
        assert!(app.game.is_none());
    }

    #[test]
    fn test_in_game_keys_reach_the_game() {
        let mut app = create_test_app();
        let now = Instant::now();
        handle_key(&mut app, KeyCode::Char('1'), now).expect("valid configuration");

        handle_key(&mut app, KeyCode::Char('r'), now).expect("valid configuration");
        assert_eq!(app.game.as_ref().map(crate::game::Game::generation), Some(1));

        handle_key(&mut app, KeyCode::Up, now).expect("moves never fail");
        let player = app
            .game
            .as_ref()
            .map(|game| game.session().player().cell());
        assert_eq!(player, Some(crate::grid::Cell::new(1, 1)), "the outer wall blocks");

        handle_key(&mut app, KeyCode::Char('m'), now).expect("menu never fails");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::SinglePlayer));
        assert!(app.game.is_none());
    }

    #[test]
    fn test_in_game_quit_exits() {
        let mut app = create_test_app();
        let now = Instant::now();
        handle_key(&mut app, KeyCode::Char('2'), now).expect("valid configuration");

        handle_key(&mut app, KeyCode::Char('q'), now).expect("quitting never fails");

        assert!(app.exit);
    }
}
