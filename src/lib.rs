//! Brick Field - a 3D ball-and-paddle block breaking game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arena, block field, collisions, game state)
//! - `config`: Data-driven game tuning
//! - `web`: Browser host bindings (wasm32 only)

pub mod config;
pub mod error;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{GameConfig, HitTest};
pub use error::SimError;

/// Arena geometry constants (world units)
pub mod consts {
    /// Paddle rest position; every other arena piece is placed relative to it
    pub const PADDLE_X: f32 = 0.0;
    pub const PADDLE_Y: f32 = 50.0;
    pub const PADDLE_Z: f32 = 200.0;

    /// Paddle box dimensions
    pub const PADDLE_WIDTH: f32 = 60.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_DEPTH: f32 = 10.0;

    /// Side walls (left and right share dimensions)
    pub const WALL_WIDTH: f32 = 5.0;
    pub const WALL_HEIGHT: f32 = 150.0;
    pub const WALL_DEPTH: f32 = 500.0;
    /// Horizontal distance from paddle center to each wall center
    pub const WALL_OFFSET_X: f32 = 250.0;
    /// Walls are centered this far behind the paddle
    pub const WALL_OFFSET_Z: f32 = 250.0;

    /// Ceiling closes the far end of the arena
    pub const CEILING_WIDTH: f32 = 500.0;
    pub const CEILING_HEIGHT: f32 = WALL_HEIGHT;
    pub const CEILING_DEPTH: f32 = 10.0;
    pub const CEILING_OFFSET_Z: f32 = 500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Spawn distance in front of the paddle
    pub const BALL_SPAWN_OFFSET_Z: f32 = 50.0;
}
