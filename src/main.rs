//! Brick Field entry point
//!
//! The browser build drives the simulation through `brick_field::web`. The
//! native binary runs a headless autoplay session and logs its progress.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Field (native) starting headless autoplay...");

    if let Err(e) = autoplay::run(0x5eed, 20_000) {
        log::error!("Autoplay failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use brick_field::sim::{Game, GameEvent, pointer_moved, step};
    use brick_field::{GameConfig, SimError};

    /// Play with a paddle that chases the ball, missing now and then
    pub fn run(seed: u64, max_steps: u32) -> Result<(), SimError> {
        let mut game = Game::new(GameConfig::default(), seed)?;
        let half_span = game.arena.right_face();

        for i in 0..max_steps {
            // Drift off target every few hundred steps so lives get lost
            let wobble = if (i / 300) % 4 == 3 { 0.4 } else { 0.0 };
            let target = game.ball.pos.x / half_span + wobble;
            pointer_moved(&mut game, target);
            step(&mut game)?;

            for event in game.drain_events() {
                match event {
                    GameEvent::LivesChanged { lives } => log::info!("step {i}: lives = {lives}"),
                    GameEvent::FieldRegenerated { generation } => {
                        log::info!("step {i}: field #{generation}")
                    }
                    GameEvent::GameOver { final_score } => {
                        log::info!("step {i}: game over, final score {final_score}")
                    }
                    _ => {}
                }
            }

            if !game.state.active {
                break;
            }
        }

        println!(
            "score={} lives={} fields={} phase={:?}",
            game.state.score,
            game.state.lives,
            game.generation,
            game.state.phase()
        );
        Ok(())
    }
}
