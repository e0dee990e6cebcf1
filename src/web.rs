//! Browser host bindings
//!
//! The page owns the scene graph and the `requestAnimationFrame` loop. It
//! calls `step()` once per frame, forwards pointer moves, and drains events
//! to keep its meshes and HUD in sync.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::config::GameConfig;
use crate::sim::{self, Game, normalize_pointer};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

/// A game session driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// New session; `seed` defaults to the current time, `config_json`
    /// overrides any subset of the default tuning
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>, config_json: Option<String>) -> Result<WebGame, JsError> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json)?,
            None => GameConfig::default(),
        };
        let seed = seed.map_or_else(|| js_sys::Date::now() as u64, u64::from);
        log::info!("Brick Field starting with seed {}", seed);

        Ok(WebGame {
            game: Game::new(config, seed)?,
        })
    }

    /// Advance one frame; a no-op after game over
    pub fn step(&mut self) -> Result<(), JsError> {
        sim::step(&mut self.game)?;
        Ok(())
    }

    /// Pointer already normalized to `[-1, 1]` across the play canvas
    pub fn set_pointer(&mut self, pointer_x: f32) {
        sim::pointer_moved(&mut self.game, pointer_x);
    }

    /// Raw pointer/mouse move over the canvas
    pub fn pointer_moved(&mut self, event: &MouseEvent, canvas: &HtmlCanvasElement) {
        let rect = canvas.get_bounding_client_rect();
        let x = normalize_pointer(event.client_x() as f32, rect.left() as f32, rect.width() as f32);
        sim::pointer_moved(&mut self.game, x);
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        let events = self.game.drain_events();
        Ok(serde_json::to_string(&events)?)
    }

    /// `[x, y, z]`
    pub fn ball_position(&self) -> Vec<f32> {
        self.game.ball.pos.to_array().to_vec()
    }

    /// `[x, y, z]`
    pub fn paddle_position(&self) -> Vec<f32> {
        self.game.paddle.pos.to_array().to_vec()
    }

    /// Arena boxes as JSON, for building the static scene
    pub fn arena(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.game.arena)?)
    }

    pub fn lives(&self) -> u32 {
        self.game.state.lives
    }

    /// Score as a float; JS numbers cannot carry a full u64
    pub fn score(&self) -> f64 {
        self.game.state.score as f64
    }

    pub fn is_active(&self) -> bool {
        self.game.state.active
    }
}
