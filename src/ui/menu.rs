use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Gauge, Paragraph};

use crate::config::THEME;
use crate::game::DeathReason;
use crate::screen::LoadingProgress;

/// Draws the welcome screen as a centered popup.
pub fn render_welcome_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("MATH SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(THEME.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from("Eat the apple with the right answer."),
        Line::from("Wrong apples cost a life."),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[M] Sound  [Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" welcome ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD or drag with the mouse to steer"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(THEME.menu_footer)),
        footer_row,
    );
}

/// Draws the loading bar and its message.
pub fn render_loading_screen(frame: &mut Frame<'_>, area: Rect, progress: LoadingProgress) {
    let popup = centered_popup(area, 70, 30);
    frame.render_widget(Clear, popup);

    let [message_row, gauge_row] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from(progress.message())).alignment(Alignment::Center),
        message_row,
    );
    frame.render_widget(
        Gauge::default()
            .block(Block::bordered().title(" loading "))
            .gauge_style(Style::default().fg(THEME.menu_title))
            .percent(u16::from(progress.percent())),
        gauge_row,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(death_reason.map_or("", cause_text)),
        Line::from(""),
        Line::from("[Enter]/[Space] Play Again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the short "GREAT!" banner at the top of the board.
pub fn render_celebration(frame: &mut Frame<'_>, board_inner: Rect) {
    let [banner_row, _] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(board_inner);

    frame.render_widget(
        Paragraph::new(Line::from("GREAT!"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(THEME.celebration)
                    .add_modifier(Modifier::BOLD),
            ),
        banner_row,
    );
}

fn cause_text(reason: DeathReason) -> &'static str {
    match reason {
        DeathReason::WallCollision => "Cause: hit the wall",
        DeathReason::SelfCollision => "Cause: bit yourself",
        DeathReason::OutOfLives => "Cause: out of lives",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
