use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{GLYPH_LIFE_EMPTY, GLYPH_LIFE_FULL, MAX_LIVES, THEME};
use crate::game::GameSnapshot;

/// Renders the two HUD rows: the question, then score, sound and lives.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, game: &GameSnapshot<'_>, sound_muted: bool) {
    let [question_row, status_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(game.question.display_text()))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(THEME.question)
                    .add_modifier(Modifier::BOLD),
            ),
        question_row,
    );

    let lives = lives_text(game.lives);
    let lives_width = u16::try_from(lives.width()).unwrap_or(u16::MAX);
    let [score_area, sound_area, lives_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(9),
        Constraint::Length(lives_width),
    ])
    .areas(status_row);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Score: ", Style::default().fg(THEME.hud_muted)),
            Span::styled(
                game.score.to_string(),
                Style::default().fg(THEME.hud_value),
            ),
        ])),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(if sound_muted { "[m] off " } else { "[m] on  " })
            .style(Style::default().fg(THEME.hud_muted)),
        sound_area,
    );

    frame.render_widget(
        Paragraph::new(lives)
            .alignment(Alignment::Right)
            .style(Style::default().fg(THEME.lives)),
        lives_area,
    );
}

/// Hearts for the remaining lives followed by empty hearts for lost ones.
fn lives_text(lives: u8) -> String {
    let lost = MAX_LIVES.saturating_sub(lives);
    let mut text = GLYPH_LIFE_FULL.repeat(usize::from(lives.min(MAX_LIVES)));
    text.push_str(&GLYPH_LIFE_EMPTY.repeat(usize::from(lost)));
    text
}

#[cfg(test)]
mod tests {
    use super::lives_text;

    #[test]
    fn lives_render_as_hearts() {
        assert_eq!(lives_text(3), "♥♥♥");
        assert_eq!(lives_text(1), "♥♡♡");
        assert_eq!(lives_text(0), "♡♡♡");
    }
}
