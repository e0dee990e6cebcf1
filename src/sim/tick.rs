//! Per-frame simulation step
//!
//! The host calls `step` once per rendered frame and `pointer_moved` whenever
//! the pointer moves. Both run on the host's single thread, so the paddle
//! position seen by a step is whatever the last pointer event wrote.

use super::collision::{StepResult, resolve};
use super::input::map_pointer_to_paddle_x;
use super::state::{Game, GameEvent};
use crate::error::SimError;

/// Move the paddle to follow a pointer X in `[-1, 1]`
pub fn pointer_moved(game: &mut Game, pointer_x: f32) {
    game.paddle.pos.x = map_pointer_to_paddle_x(
        pointer_x,
        &game.arena.left_wall,
        &game.arena.right_wall,
        game.paddle.half_width(),
    );
}

/// Advance the game by one step
///
/// Once the game is over this is a no-op.
pub fn step(game: &mut Game) -> Result<(), SimError> {
    if !game.state.active {
        return Ok(());
    }

    if game.field.is_empty() {
        game.regenerate_field()?;
    }

    let result = resolve(
        &game.ball,
        &game.paddle,
        &game.arena,
        &game.field,
        &game.state,
        &game.config,
    )?;
    apply(game, &result)?;

    Ok(())
}

/// Write a resolver outcome back into the game
fn apply(game: &mut Game, result: &StepResult) -> Result<(), SimError> {
    game.ball.pos = result.position;
    game.ball.vel = result.velocity;

    for &id in &result.destroyed {
        if let Some(block) = game.field.remove(id) {
            if block.special {
                log::debug!("Special block {} destroyed at row {}", id, block.row);
            }
            game.push_event(GameEvent::BlockDestroyed { id });
        }
    }

    if result.score_gained > 0 {
        game.state.score += result.score_gained;
        game.push_event(GameEvent::ScoreChanged {
            score: game.state.score,
        });
    }

    if result.lives_gained > 0 {
        game.state.lives += result.lives_gained;
        game.push_event(GameEvent::LivesChanged {
            lives: game.state.lives,
        });
    }

    if result.ball_exited {
        game.push_event(GameEvent::BallReset);
        if result.life_lost {
            game.state.lives = game.state.lives.saturating_sub(1);
            log::debug!("Ball lost, {} lives left", game.state.lives);
            game.push_event(GameEvent::LivesChanged {
                lives: game.state.lives,
            });
        } else {
            game.state.active = false;
            log::info!("Game over, final score {}", game.state.score);
            game.push_event(GameEvent::GameOver {
                final_score: game.state.score,
            });
            return Ok(());
        }
    }

    if game.field.is_empty() {
        game.regenerate_field()?;
    }

    Ok(())
}
