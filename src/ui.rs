//! User interface rendering functions for all application screens.

use std::{rc::Rc, time::Instant};

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    grid::{Cell, Grid},
    session::{Mode, Session, Snapshot},
    types::{self, MainMenuItem, MenuType, Screen},
    App,
};

/// Length of one on/off phase of the player flashing while invulnerable, in milliseconds.
const FLASH_PHASE_MS: u128 = 200;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::InGame => {
            let game = app.game.as_ref().ok_or_eyre("no game in progress")?;
            in_game(frame, game.session(), Instant::now())?;
        }
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders the generic layout structure for the main menu and the round-over panel.
///
/// This function creates the common layout and block structure used by both. The generic part
/// includes the centered positioning and border styling, while the specific content is handled by
/// the caller using the returned line areas.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: &MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value()) + 2)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom(menu.hint())
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(Clear, layout);
    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Single Player", "Versus Rival", and
/// "Quit". It highlights the currently selected option and provides visual feedback for user
/// navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::MainMenu(3));

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let options = [
        MainMenuItem::SinglePlayer,
        MainMenuItem::Versus,
        MainMenuItem::Quit,
    ];
    for (option, area) in options.into_iter().zip(inner_layout.iter()) {
        let style = if option == item {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(option.label(), style).centered(), *area);
    }
}

/// Renders the in-game screen: status line, maze canvas, key hints, and the round-over panel once
/// the round has ended.
///
/// The canvas bounds follow the maze, not the terminal, so a maze larger than the available area is
/// scaled down into it instead of losing its outer rows and columns. Walls, the goal, wanderers,
/// the rival and the player are drawn as separate canvas layers in that order, so agents always
/// show on top of the maze. While invulnerable, the player is hidden on
/// every other flash phase measured from `now`.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn in_game(frame: &mut Frame, session: &Session, now: Instant) -> Result<()> {
    clear(frame);

    let snapshot = session.snapshot();
    let grid = snapshot.grid;
    let maze_columns = u16::try_from(grid.width())?;
    let maze_rows = u16::try_from(grid.height())?;

    let overall_layout = Layout::vertical([
        Constraint::Length(1), // Status line
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let status_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get status area from layout")?;
    let maze_content_area = *overall_layout
        .get(1)
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let space = centered(maze_content_area, maze_columns, maze_rows)?;

    let walls = to_canvas_coords(grid.wall_cells(), grid)?;
    let goal = to_canvas_coords([grid.goal()], grid)?;
    let wanderers = to_canvas_coords(snapshot.wanderers.iter().copied(), grid)?;
    let rival = to_canvas_coords(snapshot.rival, grid)?;
    let player = if player_visible(&snapshot, now) {
        to_canvas_coords([snapshot.player], grid)?
    } else {
        Vec::new()
    };

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(maze_columns.into(), 2)).into(),
            (rounded_div::i32(maze_columns.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(maze_rows.into(), 2)).into(),
            (rounded_div::i32(maze_rows.into(), 2)).into(),
        ])
        .marker(Marker::Block)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &walls,
                color: Color::Green,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &goal,
                color: Color::Yellow,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &wanderers,
                color: Color::Red,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &rival,
                color: Color::Magenta,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &player,
                color: Color::Cyan,
            });
        });

    frame.render_widget(
        Line::styled(status_line(&snapshot, session.mode()), Color::Green).centered(),
        status_area,
    );
    frame.render_widget(maze, space);

    let tooltip_block = Block::bordered()
        .title("(arrows/wasd) move / (r) restart / (m) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_full_area);

    if let Some(headline) = types::headline(snapshot.outcome) {
        round_over(frame, headline, &snapshot);
    }

    Ok(())
}

/// Renders the panel announcing the end of a round over the maze.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
fn round_over(frame: &mut Frame, headline: &str, snapshot: &Snapshot<'_>) {
    let inner_layout = init_menu(frame, &MenuType::RoundOver(2));

    let headline_style = Style::default().fg(Color::White).bg(Color::Green);
    let content_style = Style::default().fg(Color::Green);

    frame.render_widget(
        Line::styled(headline, headline_style).centered(),
        inner_layout[0],
    );
    frame.render_widget(
        Line::styled(format!("Steps: {}", snapshot.player_steps), content_style).centered(),
        inner_layout[1],
    );
}

/// Builds the status line shown above the maze.
fn status_line(snapshot: &Snapshot<'_>, mode: Mode) -> String {
    let status = format!(
        "Steps: {} | Lives: {}",
        snapshot.player_steps, snapshot.lives
    );

    match (mode, snapshot.rival_steps) {
        (Mode::Versus, Some(steps)) => format!("{status} | Rival steps: {steps}"),
        _ => status,
    }
}

/// Returns whether the player should be drawn on this frame.
///
/// Outside an invulnerability window the player is always visible. Inside one, visibility toggles
/// every [`FLASH_PHASE_MS`] milliseconds, starting visible.
fn player_visible(snapshot: &Snapshot<'_>, now: Instant) -> bool {
    snapshot.invulnerable_since.is_none_or(|since| {
        (now.saturating_duration_since(since).as_millis() / FLASH_PHASE_MS) % 2 == 0
    })
}

/// Returns the `columns` by `rows` rectangle centered in `area`.
///
/// # Errors
///
/// Fails if the layout does not produce the middle slot.
fn centered(area: Rect, columns: u16, rows: u16) -> Result<Rect> {
    let row = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(rows),
        Constraint::Min(1),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;

    Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(columns),
        Constraint::Min(1),
    ])
    .split(row)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")
}

/// Transforms grid cells into canvas coordinates.
///
/// The canvas has its origin at the center of the drawing area with the y axis pointing up, while
/// the grid has its origin at the top-left corner with rows growing downwards. Columns map to
/// `x - (width - 1) / 2` and rows to `(height - 1) / 2 - y`.
///
/// # Errors
///
/// Fails if a dimension or coordinate does not fit in a [`u16`].
pub(crate) fn to_canvas_coords<I>(cells: I, grid: &Grid) -> Result<Vec<(f64, f64)>>
where
    I: IntoIterator<Item = Cell>,
{
    let cols_n = f64::from(u16::try_from(grid.width())?);
    let rows_n = f64::from(u16::try_from(grid.height())?);

    cells
        .into_iter()
        .map(|cell| {
            let screen_x = f64::from(u16::try_from(cell.x)?) - (cols_n - 1.) / 2.;
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(cell.y)?);

            Ok((screen_x, screen_y))
        })
        .collect()
}
