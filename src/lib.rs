//! Simulation core for a snake on a wrap-around grid.
//!
//! [`game::GameState`] is the host-facing facade: feed it frames with
//! [`game::GameState::tick`], steer it with
//! [`game::GameState::request_direction`], and read back segments, food and
//! speed between frames. The `renderer`, `ui` and `terminal_runtime` modules
//! form a small terminal host used by the bundled binary.

pub mod config;
pub mod difficulty;
pub mod driver;
pub mod events;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
