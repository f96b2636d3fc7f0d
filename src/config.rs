use ratatui::style::Color;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Fits a grid into a terminal viewport of `columns` x `rows` characters.
    ///
    /// Each logical cell is `CELL_COLUMNS` characters wide. The HUD and the
    /// board border are subtracted first and the result is capped by `max`.
    #[must_use]
    pub fn from_viewport(columns: u16, rows: u16, max: GridSize) -> Self {
        let usable_columns = columns.saturating_sub(BOARD_BORDER_COLUMNS);
        let usable_rows = rows.saturating_sub(BOARD_BORDER_ROWS + HUD_ROWS);

        let max_width = max.width.max(MIN_GRID_CELLS);
        let max_height = max.height.max(MIN_GRID_CELLS);

        Self {
            width: (usable_columns / CELL_COLUMNS).clamp(MIN_GRID_CELLS, max_width),
            height: usable_rows.clamp(MIN_GRID_CELLS, max_height),
        }
    }
}

/// Number of apples kept on the board.
pub const MAX_APPLES: usize = 5;

/// Minimum Euclidean distance between two apples, in cells.
pub const MIN_APPLE_DISTANCE: i32 = 5;

/// Lives at the start of a session.
pub const MAX_LIVES: u8 = 3;

/// Apples carrying the current answer that must be on the board after a tick.
pub const GUARANTEED_CORRECT_APPLES: usize = 1;

/// Probability that an unforced apple carries the answer (when not on board yet).
pub const CORRECT_ANSWER_CHANCE: f64 = 0.4;

/// Score granted for eating the correct apple.
pub const POINTS_PER_CORRECT_APPLE: u32 = 10;

/// Strict placement attempts before the spacing constraint is relaxed.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Cells kept free between apples and the walls.
pub const APPLE_EDGE_MARGIN: i32 = 1;

/// Segments of a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 180;

/// Tick interval used for the touch/swipe input modality.
pub const TOUCH_TICK_INTERVAL_MS: u64 = 200;

/// Lower bound accepted for any configured tick interval.
pub const MIN_TICK_INTERVAL_MS: u64 = 40;

/// Default maximum grid width (cells).
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default maximum grid height (cells).
pub const DEFAULT_GRID_HEIGHT: u16 = 27;

/// Smallest grid accepted on either axis.
pub const MIN_GRID_CELLS: u16 = 8;

/// Terminal columns used to draw one logical cell.
pub const CELL_COLUMNS: u16 = 3;

/// Rows reserved for the HUD above the board.
pub const HUD_ROWS: u16 = 2;

const BOARD_BORDER_COLUMNS: u16 = 2;
const BOARD_BORDER_ROWS: u16 = 2;

/// Minimum drag distance, in cells, that counts as a swipe.
pub const SWIPE_MIN_CELLS: i32 = 2;

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub apple_fg: Color,
    pub apple_bg: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub question: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub lives: Color,
    pub celebration: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// The single built-in theme.
pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    apple_fg: Color::White,
    apple_bg: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::Gray,
    question: Color::Yellow,
    hud_value: Color::White,
    hud_muted: Color::DarkGray,
    lives: Color::LightRed,
    celebration: Color::LightYellow,
    menu_title: Color::LightGreen,
    menu_footer: Color::DarkGray,
};

/// Snake head glyph (one logical cell).
pub const GLYPH_SNAKE_HEAD: &str = "▐█▌";

/// Snake body glyph (one logical cell).
pub const GLYPH_SNAKE_BODY: &str = "▒▒▒";

/// Filled heart used by the lives counter.
pub const GLYPH_LIFE_FULL: &str = "♥";

/// Empty heart used by the lives counter.
pub const GLYPH_LIFE_EMPTY: &str = "♡";

#[cfg(test)]
mod tests {
    use super::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GridSize, MIN_GRID_CELLS};

    const MAX: GridSize = GridSize {
        width: DEFAULT_GRID_WIDTH,
        height: DEFAULT_GRID_HEIGHT,
    };

    #[test]
    fn large_viewport_is_capped_at_maximum_grid() {
        let grid = GridSize::from_viewport(400, 120, MAX);
        assert_eq!(grid, MAX);
    }

    #[test]
    fn viewport_width_is_divided_into_cells() {
        // 62 columns minus 2 border columns = 60 columns = 20 cells.
        let grid = GridSize::from_viewport(62, 20, MAX);
        assert_eq!(grid.width, 20);
        assert_eq!(grid.height, 16);
    }

    #[test]
    fn tiny_viewport_keeps_minimum_grid() {
        let grid = GridSize::from_viewport(4, 3, MAX);
        assert_eq!(grid.width, MIN_GRID_CELLS);
        assert_eq!(grid.height, MIN_GRID_CELLS);
    }
}
