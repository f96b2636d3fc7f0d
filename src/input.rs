use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::{CELL_COLUMNS, SWIPE_MIN_CELLS};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    ToggleSound,
    Quit,
    Resize { columns: u16, rows: u16 },
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps a drag of `dx` x `dy` cells onto a direction along its dominant axis.
///
/// Drags shorter than `min_cells` on both axes are ignored. Ties go to the
/// vertical axis.
#[must_use]
pub fn swipe_direction(dx: i32, dy: i32, min_cells: i32) -> Option<Direction> {
    if dx.abs().max(dy.abs()) < min_cells {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Maps a key press onto a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        KeyCode::Char('m' | 'M') => Some(GameInput::ToggleSound),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}

/// Source of player input, polled once per frame.
pub trait InputSource {
    /// Waits up to `timeout` for one input event.
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>>;
}

/// Terminal input source: keyboard, mouse-drag swipes and viewport resizes.
#[derive(Debug, Default)]
pub struct InputHandler {
    drag_start: Option<(u16, u16)>,
}

impl InputSource for InputHandler {
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => Some(GameInput::Resize { columns, rows }),
            _ => None,
        })
    }
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (start_column, start_row) = self.drag_start.take()?;
                let dx = (i32::from(mouse.column) - i32::from(start_column))
                    / i32::from(CELL_COLUMNS);
                let dy = i32::from(mouse.row) - i32::from(start_row);
                swipe_direction(dx, dy, SWIPE_MIN_CELLS).map(GameInput::Direction)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    use super::{
        Direction, GameInput, InputHandler, direction_change_is_valid, map_key, swipe_direction,
    };

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reverse_direction_change_is_invalid() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn swipe_uses_dominant_axis() {
        assert_eq!(swipe_direction(5, 2, 2), Some(Direction::Right));
        assert_eq!(swipe_direction(-5, 2, 2), Some(Direction::Left));
        assert_eq!(swipe_direction(1, -4, 2), Some(Direction::Up));
        assert_eq!(swipe_direction(0, 3, 2), Some(Direction::Down));
    }

    #[test]
    fn short_swipe_is_ignored() {
        assert_eq!(swipe_direction(1, 1, 2), None);
        assert_eq!(swipe_direction(0, 0, 2), None);
    }

    #[test]
    fn keys_map_to_inputs() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key(press(KeyCode::Char('w'))),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Left)),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(map_key(press(KeyCode::Enter)), Some(GameInput::Confirm));
        assert_eq!(map_key(press(KeyCode::Char('m'))), Some(GameInput::ToggleSound));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn mouse_drag_becomes_swipe() {
        let mouse = |kind, column, row| MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        let mut handler = InputHandler::new();

        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10)),
            None
        );
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 22, 11)),
            Some(GameInput::Direction(Direction::Right))
        );

        // Release without a press is not a swipe.
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0)),
            None
        );
    }
}
