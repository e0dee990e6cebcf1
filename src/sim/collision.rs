//! Collision detection and response
//!
//! One resolver pass per step, in a fixed order: integrate, side walls,
//! ceiling, paddle, blocks, exit. The resolver is pure: it reads the current
//! state and describes the outcome in a `StepResult` for the game to apply.
//!
//! Surfaces reflect a velocity component only while the ball is moving into
//! them, so a ball that overshoots a face leaves it on the next step instead
//! of flipping back and forth.

use glam::Vec3;

use super::arena::{Aabb, Arena, Paddle};
use super::state::{Ball, Block, BlockField, GameState};
use crate::config::{GameConfig, HitTest};
use crate::error::SimError;

/// Outcome of one resolver pass
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Ids of blocks hit this step, in field order
    pub destroyed: Vec<u32>,
    pub score_gained: u64,
    /// Extra lives from special blocks
    pub lives_gained: u32,
    /// Ball left the arena with lives to spare
    pub life_lost: bool,
    /// Ball left the arena (position/velocity are already the reset pose)
    pub ball_exited: bool,
}

impl StepResult {
    /// Ball left the arena with no lives left
    pub fn is_terminal(&self) -> bool {
        self.ball_exited && !self.life_lost
    }
}

/// Does the ball touch this block
pub fn ball_block_hit(ball_pos: Vec3, ball_radius: f32, block: &Block, hit_test: HitTest) -> bool {
    match hit_test {
        HitTest::CenterDistance => ball_pos.distance(block.pos) < ball_radius + block.half_depth,
        HitTest::SphereBox => {
            let bounds = Aabb {
                center: block.pos,
                half_extents: block.half_extents(),
            };
            bounds.closest_point(ball_pos).distance_squared(ball_pos) < ball_radius * ball_radius
        }
    }
}

/// Scale speed by `growth`, then cap its magnitude at `max_speed`
#[inline]
pub fn accelerate(vel: Vec3, growth: f32, max_speed: f32) -> Vec3 {
    (vel * growth).clamp_length_max(max_speed)
}

/// Finite center and finite, non-negative extents
fn check_box(what: &str, center: Vec3, half_extents: Vec3) -> Result<(), SimError> {
    if !center.is_finite() || !half_extents.is_finite() || half_extents.min_element() < 0.0 {
        return Err(SimError::precondition(format!(
            "invalid {what} geometry: center={center}, half_extents={half_extents}"
        )));
    }
    Ok(())
}

fn check_preconditions(
    ball: &Ball,
    paddle: &Paddle,
    arena: &Arena,
    field: &BlockField,
    state: &GameState,
) -> Result<(), SimError> {
    if !ball.pos.is_finite() || !ball.vel.is_finite() {
        return Err(SimError::precondition(format!(
            "ball state is not finite: pos={}, vel={}",
            ball.pos, ball.vel
        )));
    }
    if !ball.radius.is_finite() || ball.radius < 0.0 {
        return Err(SimError::precondition(format!(
            "invalid ball radius {}",
            ball.radius
        )));
    }
    check_box(
        "paddle",
        paddle.pos,
        Vec3::new(paddle.width, paddle.height, paddle.depth) / 2.0,
    )?;
    check_box("left wall", arena.left_wall.center, arena.left_wall.half_extents)?;
    check_box("right wall", arena.right_wall.center, arena.right_wall.half_extents)?;
    check_box("ceiling", arena.ceiling.center, arena.ceiling.half_extents)?;
    for block in field.blocks() {
        check_box(&format!("block {}", block.id), block.pos, block.half_extents())?;
    }
    if !state.max_speed.is_finite() || state.max_speed <= 0.0 {
        return Err(SimError::precondition(format!(
            "invalid max speed {}",
            state.max_speed
        )));
    }
    Ok(())
}

/// Advance the ball one step against the arena and the block field
pub fn resolve(
    ball: &Ball,
    paddle: &Paddle,
    arena: &Arena,
    field: &BlockField,
    state: &GameState,
    config: &GameConfig,
) -> Result<StepResult, SimError> {
    check_preconditions(ball, paddle, arena, field, state)?;

    let mut pos = ball.pos + ball.vel;
    let mut vel = ball.vel;

    // Side walls
    if (pos.x <= arena.left_face() && vel.x < 0.0) || (pos.x >= arena.right_face() && vel.x > 0.0)
    {
        vel.x = -vel.x;
    }

    // Ceiling
    if pos.z <= arena.ceiling_face() && vel.z < 0.0 {
        vel.z = -vel.z;
    }

    // Paddle
    if paddle.contains_band(pos) && vel.z > 0.0 {
        vel.z = -vel.z;
    }

    // Blocks, in ascending id order
    let mut destroyed = Vec::new();
    let mut score_gained = 0;
    let mut lives_gained = 0;
    for block in field.blocks() {
        if !ball_block_hit(pos, ball.radius, block, config.hit_test) {
            continue;
        }
        destroyed.push(block.id);
        vel.z = -vel.z;
        score_gained += config.points_per_block;
        vel = accelerate(vel, config.growth_factor, state.max_speed);
        if block.special {
            lives_gained += 1;
        }
    }

    // Exit past the paddle
    let ball_exited = pos.z > paddle.exit_z();
    let life_lost = ball_exited && state.lives + lives_gained > 0;
    if ball_exited {
        pos = paddle.spawn_point();
        vel = config.initial_velocity;
    }

    Ok(StepResult {
        position: pos,
        velocity: vel,
        destroyed,
        score_gained,
        lives_gained,
        life_lost,
        ball_exited,
    })
}
