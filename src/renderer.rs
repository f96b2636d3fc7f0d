use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_COLUMNS, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GridSize, HUD_ROWS, THEME};
use crate::game::GameSnapshot;
use crate::render::Scene;
use crate::screen::{Overlay, Screen};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{
    render_celebration, render_game_over_menu, render_loading_screen, render_welcome_menu,
};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, scene: &Scene<'_>) {
    let bounds = scene.game.bounds;
    let [hud_area, board_area] =
        Layout::vertical([Constraint::Length(HUD_ROWS), Constraint::Min(0)]).areas(frame.area());

    let board_area = board_rect(board_area, bounds);
    let hud_area = Rect {
        x: board_area.x,
        width: board_area.width,
        ..hud_area
    };
    render_hud(frame, hud_area, &scene.game, scene.sound_muted);

    let block = Block::bordered()
        .border_style(Style::new().fg(THEME.border_fg))
        .style(Style::new().bg(THEME.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_apples(frame, inner, &scene.game);
    render_snake(frame, inner, &scene.game);

    match scene.screen.screen() {
        Screen::Welcome => render_welcome_menu(frame, board_area),
        Screen::Loading(progress) => render_loading_screen(frame, board_area, progress),
        Screen::Playing => {
            for overlay in scene.screen.overlays() {
                match overlay {
                    Overlay::Celebration => render_celebration(frame, inner),
                    Overlay::Points { position, points } => {
                        render_points(frame, inner, bounds, position, points);
                    }
                }
            }
        }
        Screen::GameOver => render_game_over_menu(
            frame,
            board_area,
            scene.game.score,
            scene.game.death_reason,
        ),
    }
}

/// Board rectangle (border included) centered horizontally in `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = (bounds.width.saturating_mul(CELL_COLUMNS) + 2).min(area.width);
    let height = (bounds.height + 2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height,
    }
}

fn render_apples(frame: &mut Frame<'_>, inner: Rect, game: &GameSnapshot<'_>) {
    let style = Style::new()
        .fg(THEME.apple_fg)
        .bg(THEME.apple_bg)
        .add_modifier(Modifier::BOLD);

    let buffer = frame.buffer_mut();
    for apple in game.apples {
        let Some((x, y)) = logical_to_terminal(inner, game.bounds, apple.position) else {
            continue;
        };
        let label = format!("{:^width$}", apple.value, width = usize::from(CELL_COLUMNS));
        buffer.set_string(x, y, label, style);
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, game: &GameSnapshot<'_>) {
    let buffer = frame.buffer_mut();
    for (index, segment) in game.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, game.bounds, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(THEME.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(THEME.snake_body));
        }
    }
}

/// Draws `+points` one row above the eaten cell.
fn render_points(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, at: Position, points: u32) {
    let above = Position {
        x: at.x,
        y: (at.y - 1).max(0),
    };
    let Some((x, y)) = logical_to_terminal(inner, bounds, above) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        format!("+{points}"),
        Style::new()
            .fg(THEME.celebration)
            .add_modifier(Modifier::BOLD),
    );
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
