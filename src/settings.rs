use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TICK_INTERVAL_MS, GridSize, MIN_GRID_CELLS,
    MIN_TICK_INTERVAL_MS, TOUCH_TICK_INTERVAL_MS,
};
use crate::error::{MathSnakeError, Result};

const APP_DIR_NAME: &str = "math-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Runtime settings, read from an optional JSON file and overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Tick interval for keyboard play.
    pub tick_interval_ms: u64,
    /// Tick interval when playing with swipe gestures.
    pub touch_tick_interval_ms: u64,
    /// Upper bound on grid width; the viewport may shrink it further.
    pub max_grid_width: u16,
    /// Upper bound on grid height; the viewport may shrink it further.
    pub max_grid_height: u16,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            touch_tick_interval_ms: TOUCH_TICK_INTERVAL_MS,
            max_grid_width: DEFAULT_GRID_WIDTH,
            max_grid_height: DEFAULT_GRID_HEIGHT,
            sound: true,
        }
    }
}

impl Settings {
    /// Checks value ranges the game cannot run with.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("tick_interval_ms", self.tick_interval_ms),
            ("touch_tick_interval_ms", self.touch_tick_interval_ms),
        ] {
            if value < MIN_TICK_INTERVAL_MS {
                return Err(MathSnakeError::InvalidSettings {
                    field,
                    reason: format!("{value} ms is below the minimum of {MIN_TICK_INTERVAL_MS} ms"),
                });
            }
        }

        for (field, value) in [
            ("max_grid_width", self.max_grid_width),
            ("max_grid_height", self.max_grid_height),
        ] {
            if value < MIN_GRID_CELLS {
                return Err(MathSnakeError::InvalidSettings {
                    field,
                    reason: format!("{value} cells is below the minimum of {MIN_GRID_CELLS}"),
                });
            }
        }

        Ok(())
    }

    /// Largest grid the board may use.
    #[must_use]
    pub fn max_grid(&self) -> GridSize {
        GridSize {
            width: self.max_grid_width,
            height: self.max_grid_height,
        }
    }

    /// Tick interval for the chosen input modality.
    #[must_use]
    pub fn tick_interval(&self, touch: bool) -> Duration {
        Duration::from_millis(if touch {
            self.touch_tick_interval_ms
        } else {
            self.tick_interval_ms
        })
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from the default location.
pub fn load_settings() -> Result<Settings> {
    load_settings_from_path(&settings_path())
}

/// Loads settings from `path`.
///
/// Returns defaults when the file does not exist. Returns `Err` when the
/// file exists but cannot be read, parsed or validated, so the caller can
/// warn before entering raw terminal mode.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };

    let settings: Settings =
        serde_json::from_str(&raw).map_err(|source| MathSnakeError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.validate()?;
    Ok(settings)
}
