use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigError, FoodCheckOrder, GameConfig};
use crate::difficulty::Difficulty;
use crate::driver::FrameGate;
use crate::events::GameEvent;
use crate::food::{Food, FoodManager};
use crate::geometry::{Cell, GridGeometry};
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::snake::{Segment, Snake};

/// Current high-level gameplay state.
///
/// There is no terminal state: self-collision shortens the snake and play
/// continues.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: FoodManager,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub step_count: u64,
    geometry: GridGeometry,
    food_check: FoodCheckOrder,
    gate: FrameGate,
    requested: Option<Direction>,
    rng: StdRng,
}

impl GameState {
    /// Creates a session from `config`, seeding food placement from
    /// `config.seed` or from entropy.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a session on a `cells_x` by `cells_y` grid with default tuning.
    pub fn initialize(
        cells_x: u16,
        cells_y: u16,
        cell_width: u16,
        cell_height: u16,
    ) -> Result<Self, ConfigError> {
        Self::new(&GameConfig {
            cells_x,
            cells_y,
            cell_width,
            cell_height,
            ..GameConfig::default()
        })
    }

    fn with_rng(config: &GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let geometry = config.geometry();
        let snake = Snake::new(config.start, config.start_direction, &geometry);
        let mut food = FoodManager::new(config.food_kinds.len());
        food.respawn(&mut rng, &geometry);

        info!(
            "session start: {}x{} cells, speed {}, wrap {:?}",
            geometry.cells_x, geometry.cells_y, config.initial_speed, geometry.wrap_mode
        );

        Ok(Self {
            snake,
            food,
            difficulty: Difficulty::new(
                config.initial_speed,
                config.min_speed,
                config.slowest_speed,
                config.speed_step,
                config.growth_cadence,
            ),
            status: GameStatus::Playing,
            step_count: 0,
            geometry,
            food_check: config.food_check,
            gate: FrameGate::new(),
            requested: None,
            rng,
        })
    }

    /// Records the direction for the next step. Last write wins; a reversal
    /// of the current direction is dropped.
    pub fn request_direction(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.snake.direction(), direction) {
            debug!("dropping reversal request {direction:?}");
            return;
        }
        self.requested = Some(direction);
    }

    /// Feeds one host frame. Runs at most one step, once enough frames have
    /// accumulated for the current speed.
    pub fn tick(&mut self, frame_delta: f32) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }

        if self.gate.advance(frame_delta, self.difficulty.speed()) {
            self.step()
        } else {
            Vec::new()
        }
    }

    /// Runs one simulation step immediately, bypassing the frame gate.
    pub fn step(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.step_count += 1;

        if self.food_check == FoodCheckOrder::BeforeMove {
            self.eat_if_on_food(&mut events);
        }

        let direction = self.requested.take().unwrap_or(self.snake.direction());
        let outcome = self.snake.step(direction, &self.geometry);

        if let Some(truncated) = outcome.truncated {
            events.push(GameEvent::SelfCollision { truncated });
            if self.difficulty.on_self_collision() {
                events.push(GameEvent::SpeedChanged {
                    speed: self.difficulty.speed(),
                });
            }
        }

        if self.food_check == FoodCheckOrder::AfterMove {
            self.eat_if_on_food(&mut events);
        }

        events
    }

    /// One meal per step, however many items share the head cell.
    fn eat_if_on_food(&mut self, events: &mut Vec<GameEvent>) {
        if !self.food.consumed_by(self.snake.head()) {
            return;
        }

        self.snake.grow();
        let new_length = self.snake.len();
        events.push(GameEvent::Growth { new_length });

        let items = self.food.respawn(&mut self.rng, &self.geometry).to_vec();
        events.push(GameEvent::FoodRespawned(items));

        if self.difficulty.on_growth(new_length) {
            events.push(GameEvent::SpeedChanged {
                speed: self.difficulty.speed(),
            });
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    self.request_direction(direction);
                }
            }
            GameInput::Pause => {
                self.status = match self.status {
                    GameStatus::Playing => GameStatus::Paused,
                    GameStatus::Paused => GameStatus::Playing,
                };
            }
            GameInput::Quit => {}
        }
    }

    #[must_use]
    pub fn head_cell(&self) -> Cell {
        self.snake.head()
    }

    /// Pixel position of the head's top-left corner.
    #[must_use]
    pub fn head_pixel(&self) -> (i32, i32) {
        self.geometry.to_pixel(self.snake.head())
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.snake.segments()
    }

    #[must_use]
    pub fn active_food(&self) -> &[Food] {
        self.food.items()
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn current_speed(&self) -> u32 {
        self.difficulty.speed()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn tail_heading(&self) -> Option<Direction> {
        self.snake.tail_heading(&self.geometry)
    }

    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }
}
