//! Snake meets arithmetic: steer the snake to the apple carrying the answer
//! to the current question while avoiding wrong apples, walls and yourself.
//!
//! The simulation core (`game`, `apple`, `question`, `snake`) has no
//! presentation dependencies. Rendering, audio, input and tick scheduling
//! sit behind the traits in `render`, `audio`, `input` and `ticker`.

pub mod app;
pub mod apple;
pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod question;
pub mod render;
pub mod renderer;
pub mod screen;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ticker;
pub mod ui;

pub use error::{MathSnakeError, Result};
