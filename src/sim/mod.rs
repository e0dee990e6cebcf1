//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-step displacement only
//! - Seeded RNG only
//! - Stable iteration order (by block ID)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod field;
pub mod input;
pub mod state;
pub mod tick;

pub use arena::{Aabb, Arena, Paddle};
pub use collision::{StepResult, accelerate, ball_block_hit, resolve};
pub use field::{BLOCK_VARIANTS, FieldLayout, generate};
pub use input::{map_pointer_to_paddle_x, normalize_pointer};
pub use state::{Ball, Block, BlockField, Game, GameEvent, GamePhase, GameState};
pub use tick::{pointer_moved, step};
