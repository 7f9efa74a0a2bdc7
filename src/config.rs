use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Cell, GridGeometry, WrapMode};
use crate::input::Direction;

const APP_DIR_NAME: &str = "toroid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default grid width in cells.
pub const DEFAULT_CELLS_X: u16 = 24;

/// Default grid height in cells.
pub const DEFAULT_CELLS_Y: u16 = 24;

/// Default cell extent in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 10;

/// Frames per step at session start.
pub const INITIAL_SPEED: u32 = 14;

/// Fastest allowed frames per step.
pub const MIN_SPEED: u32 = 1;

/// Interval change applied per difficulty adjustment.
pub const SPEED_STEP: u32 = 1;

/// Segment count multiple that triggers a speed-up.
pub const GROWTH_CADENCE: usize = 4;

/// Smallest grid axis the wrap arithmetic supports.
pub const MIN_GRID_CELLS: u16 = 3;

/// Whether food is checked against the head before or after it moves.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCheckOrder {
    /// Compare the head's pre-move cell; the meal lands one step early.
    #[default]
    BeforeMove,
    /// Compare the cell the head just moved into.
    AfterMove,
}

/// Failures while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session settings. Every field has a default, so partial JSON files work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cells_x: u16,
    pub cells_y: u16,
    pub cell_width: u16,
    pub cell_height: u16,
    pub initial_speed: u32,
    pub min_speed: u32,
    /// Upper bound for slow-downs; unbounded when absent.
    pub slowest_speed: Option<u32>,
    pub speed_step: u32,
    pub growth_cadence: usize,
    /// Visual kinds food can take. Only the count matters to the simulation.
    pub food_kinds: Vec<String>,
    pub start: Cell,
    pub start_direction: Direction,
    pub wrap_mode: WrapMode,
    pub food_check: FoodCheckOrder,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cells_x: DEFAULT_CELLS_X,
            cells_y: DEFAULT_CELLS_Y,
            cell_width: DEFAULT_CELL_SIZE,
            cell_height: DEFAULT_CELL_SIZE,
            initial_speed: INITIAL_SPEED,
            min_speed: MIN_SPEED,
            slowest_speed: None,
            speed_step: SPEED_STEP,
            growth_cadence: GROWTH_CADENCE,
            food_kinds: vec!["flowerTop".to_owned(), "eggHead".to_owned()],
            start: Cell::new(0, 0),
            start_direction: Direction::Right,
            wrap_mode: WrapMode::Toroidal,
            food_check: FoodCheckOrder::BeforeMove,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw)
    }

    /// Loads `path` when given, otherwise the platform default file if it
    /// exists, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parses and validates a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cells_x < MIN_GRID_CELLS || self.cells_y < MIN_GRID_CELLS {
            return Err(invalid(format!(
                "grid must be at least {MIN_GRID_CELLS}x{MIN_GRID_CELLS} cells, got {}x{}",
                self.cells_x, self.cells_y
            )));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(invalid("cell extents must be non-zero"));
        }
        let span_x = i32::from(self.cells_x).checked_mul(i32::from(self.cell_width));
        let span_y = i32::from(self.cells_y).checked_mul(i32::from(self.cell_height));
        if span_x.is_none() || span_y.is_none() {
            return Err(invalid(format!(
                "{}x{} cells of {}x{} px overflow pixel coordinates",
                self.cells_x, self.cells_y, self.cell_width, self.cell_height
            )));
        }
        if self.food_kinds.is_empty() {
            return Err(invalid("at least one food kind is required"));
        }
        if self.speed_step == 0 {
            return Err(invalid("speed_step must be non-zero"));
        }
        if self.growth_cadence == 0 {
            return Err(invalid("growth_cadence must be non-zero"));
        }
        if self.min_speed > self.initial_speed {
            return Err(invalid(format!(
                "min_speed {} exceeds initial_speed {}",
                self.min_speed, self.initial_speed
            )));
        }
        if let Some(slowest) = self.slowest_speed.filter(|&s| s < self.initial_speed) {
            return Err(invalid(format!(
                "slowest_speed {slowest} is below initial_speed {}",
                self.initial_speed
            )));
        }
        if !self.geometry().contains(self.start) {
            return Err(invalid(format!(
                "start cell {:?} lies outside the grid",
                self.start
            )));
        }

        Ok(())
    }

    /// Grid geometry described by this config.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(
            self.cells_x,
            self.cells_y,
            self.cell_width,
            self.cell_height,
        )
        .with_wrap_mode(self.wrap_mode)
    }
}

/// Returns the platform-correct default config path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push("snake.log");
    base
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
