//! Type definitions and enums for the application state and navigation.

use crate::session::{Loss, Mode, Outcome};

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu screen of the game, with the highlighted item.
    MainMenu(MainMenuItem),
    /// In-game maze screen.
    ///
    /// This variant represents the screen where a round is played. The round-over panel is drawn
    /// on top of it once the round ends.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Single Player" menu option.
    SinglePlayer,
    /// "Versus Rival" menu option.
    Versus,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::SinglePlayer => Self::Versus,
            Self::Versus | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Quit => Self::Versus,
            Self::Versus | Self::SinglePlayer => Self::SinglePlayer,
        }
    }

    /// Returns the game mode this item starts, if it starts one.
    pub(crate) const fn mode(self) -> Option<Mode> {
        match self {
            Self::SinglePlayer => Some(Mode::Solo),
            Self::Versus => Some(Mode::Versus),
            Self::Quit => None,
        }
    }

    /// Returns the label shown in the menu.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::SinglePlayer => "Single Player",
            Self::Versus => "Versus Rival",
            Self::Quit => "Quit",
        }
    }
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration, with its number of items.
    MainMenu(u8),
    /// Round-over panel configuration, with its number of lines.
    RoundOver(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::RoundOver(_) => "Round Over",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu lines for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::RoundOver(value) => *value,
        }
    }

    /// Returns the key hint shown in the bottom border.
    pub(crate) const fn hint(&self) -> &str {
        match self {
            Self::MainMenu(_) => "(j) down / (k) up / (l) select",
            Self::RoundOver(_) => "(r) restart / (m) menu / (q) quit",
        }
    }
}

/// Returns the headline of a finished round, or nothing while it is still being played.
pub(crate) const fn headline(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Ongoing => None,
        Outcome::Won => Some("You Win!"),
        Outcome::Lost(Loss::Outpaced) => Some("You Lose!"),
        Outcome::Lost(Loss::OutOfLives) => Some("Game Over"),
    }
}
