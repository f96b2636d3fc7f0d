use std::io;

use crate::game::GameSnapshot;
use crate::screen::ScreenController;

/// Everything a render surface draws for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub game: GameSnapshot<'a>,
    pub screen: &'a ScreenController,
    pub sound_muted: bool,
}

/// Presentation target for the current frame.
///
/// Called every frame; implementations only read the scene. Errors are
/// reserved for a broken output device, never for game state.
pub trait RenderSurface {
    fn render(&mut self, scene: &Scene<'_>) -> io::Result<()>;

    /// Current drawable size in terminal cells (columns, rows).
    fn viewport(&self) -> io::Result<(u16, u16)>;
}
