use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::GameError;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid, walls included.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Fails when the grid has no interior cell for the snake to start on, or
    /// is larger than the front end can lay out.
    pub fn validate(self) -> Result<(), GameError> {
        if self.width < 3
            || self.height < 3
            || self.width > MAX_GRID_WIDTH
            || self.height > MAX_GRID_HEIGHT
        {
            return Err(GameError::InvalidGridSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Default board width in cells, border included.
pub const DEFAULT_GRID_WIDTH: u16 = 24;

/// Default board height in cells, border included.
pub const DEFAULT_GRID_HEIGHT: u16 = 16;

/// Largest accepted board width; at two columns per cell this fills 256 columns.
pub const MAX_GRID_WIDTH: u16 = 128;

/// Largest accepted board height.
pub const MAX_GRID_HEIGHT: u16 = 64;

/// Default time between movement ticks in milliseconds.
pub const DEFAULT_MOVEMENT_INTERVAL_MS: u64 = 150;

/// Pause between a collision and the automatic reset.
pub const DEFAULT_RESET_DELAY_MS: u64 = 5_000;

/// Magnitude handed to the collision-feedback effect.
pub const DEFAULT_COLLISION_FORCE: f32 = 8.0;

/// Frame cadence of the input sampling step.
pub const INPUT_POLL_INTERVAL_MS: u64 = 16;

/// Colors and glyphs used by the terminal front end.
#[derive(Debug)]
pub struct Palette {
    pub wall: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub item: Color,
    pub debris: Color,
    pub hud_score: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const PALETTE: Palette = Palette {
    wall: Color::DarkGray,
    snake_head: Color::White,
    snake_body: Color::Green,
    item: Color::Red,
    debris: Color::LightGreen,
    hud_score: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Two columns per cell keep grid squares roughly square in a terminal.
pub const GLYPH_WALL: &str = "▓▓";
pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▒▒";
pub const GLYPH_ITEM: &str = "◆ ";
pub const GLYPH_DEBRIS: &str = "░░";
pub const CELL_COLUMNS: u16 = 2;

/// Fully resolved runtime settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub grid: GridSize,
    pub movement_interval: Duration,
    pub reset_delay: Duration,
    pub collision_force: f32,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            movement_interval: Duration::from_millis(DEFAULT_MOVEMENT_INTERVAL_MS),
            reset_delay: Duration::from_millis(DEFAULT_RESET_DELAY_MS),
            collision_force: DEFAULT_COLLISION_FORCE,
            seed: None,
        }
    }
}

/// One partial layer of settings: the JSON file or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsLayer {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub interval_ms: Option<u64>,
    pub reset_delay_ms: Option<u64>,
    pub force: Option<f32>,
    pub seed: Option<u64>,
}

impl Settings {
    /// Resolves defaults, then the settings file, then `overrides`.
    ///
    /// An explicit `config_path` must exist. Without one the platform default
    /// path is tried and silently skipped when absent.
    pub fn load(config_path: Option<&Path>, overrides: SettingsLayer) -> Result<Self, GameError> {
        let file_layer = match config_path {
            Some(path) => load_layer_from_path(path, true)?,
            None => match settings_path() {
                Some(path) => load_layer_from_path(&path, false)?,
                None => SettingsLayer::default(),
            },
        };

        let mut settings = Self::default();
        settings.apply(file_layer);
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    /// Overwrites every field the layer sets.
    pub fn apply(&mut self, layer: SettingsLayer) {
        if let Some(width) = layer.width {
            self.grid.width = width;
        }
        if let Some(height) = layer.height {
            self.grid.height = height;
        }
        if let Some(ms) = layer.interval_ms {
            self.movement_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = layer.reset_delay_ms {
            self.reset_delay = Duration::from_millis(ms);
        }
        if let Some(force) = layer.force {
            self.collision_force = force;
        }
        if layer.seed.is_some() {
            self.seed = layer.seed;
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.grid.validate()?;
        if self.movement_interval.is_zero() {
            return Err(GameError::InvalidInterval);
        }
        if !self.collision_force.is_finite() || self.collision_force < 0.0 {
            return Err(GameError::InvalidForce);
        }
        Ok(())
    }
}

/// Returns the platform-correct settings file path, if a config dir exists.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}

fn load_layer_from_path(path: &Path, required: bool) -> Result<SettingsLayer, GameError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(SettingsLayer::default());
        }
        Err(e) => return Err(GameError::Settings(format!("{}: {e}", path.display()))),
    };

    serde_json::from_str::<SettingsLayer>(&raw)
        .map_err(|e| GameError::Settings(format!("{}: {e}", path.display())))
}
