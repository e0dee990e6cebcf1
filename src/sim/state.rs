//! Game state and core simulation types
//!
//! Pure simulation entities. Nothing here knows about meshes or the DOM; the
//! host maps block ids to its own visual objects through `GameEvent`s.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Paddle};
use super::field::{self, FieldLayout};
use crate::config::GameConfig;
use crate::consts::BALL_RADIUS;
use crate::error::SimError;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play
    Active,
    /// Lives exhausted; terminal for this session
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    /// Displacement applied once per step
    pub vel: Vec3,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec3, vel: Vec3) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A breakable block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub row: u32,
    pub col: u32,
    pub pos: Vec3,
    pub half_width: f32,
    pub half_height: f32,
    pub half_depth: f32,
    /// Grants an extra life when destroyed
    pub special: bool,
    /// Seeded look for the renderer, below `field::BLOCK_VARIANTS`
    pub variant: u8,
}

impl Block {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.half_width, self.half_height, self.half_depth)
    }
}

/// The live blocks, kept sorted by id for deterministic iteration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockField {
    blocks: Vec<Block>,
}

impl BlockField {
    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(|b| b.id);
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Remove a block by id, returning it if it was live
    pub fn remove(&mut self, id: u32) -> Option<Block> {
        let index = self.blocks.binary_search_by_key(&id, |b| b.id).ok()?;
        Some(self.blocks.remove(index))
    }

    pub fn special_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.special).count()
    }
}

/// Notifications for the rendering and UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    BlockCreated { block: Block },
    BlockDestroyed { id: u32 },
    LivesChanged { lives: u32 },
    ScoreChanged { score: u64 },
    /// A fresh field replaced an emptied one
    FieldRegenerated { generation: u32 },
    /// Ball returned to the spawn pose after leaving the arena
    BallReset,
    /// Sent exactly once per session
    GameOver { final_score: u64 },
}

/// Lives, score and session status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub lives: u32,
    pub score: u64,
    pub active: bool,
    pub max_speed: f32,
}

impl GameState {
    pub fn new(lives: u32, max_speed: f32) -> Self {
        Self {
            lives,
            score: 0,
            active: true,
            max_speed,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.active {
            GamePhase::Active
        } else {
            GamePhase::GameOver
        }
    }
}

/// A complete session: everything `step` reads and writes
#[derive(Debug, Clone)]
pub struct Game {
    pub config: GameConfig,
    pub arena: Arena,
    pub paddle: Paddle,
    pub ball: Ball,
    pub field: BlockField,
    pub state: GameState,
    /// Fields generated so far, including the first
    pub generation: u32,
    rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Game {
    /// Start a session with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;

        let paddle = Paddle::default();
        let arena = Arena::around(&paddle);
        let ball = Ball::new(paddle.spawn_point(), config.initial_velocity);
        let state = GameState::new(config.starting_lives, config.max_speed);

        let mut game = Self {
            config,
            arena,
            paddle,
            ball,
            field: BlockField::default(),
            state,
            generation: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        game.regenerate_field()?;
        game.events.push(GameEvent::LivesChanged {
            lives: game.state.lives,
        });
        game.events.push(GameEvent::ScoreChanged { score: 0 });

        log::info!(
            "New game: seed={}, lives={}, field {}x{}",
            seed,
            game.state.lives,
            game.config.rows,
            game.config.cols
        );
        Ok(game)
    }

    /// Layout used for every generated field
    pub fn field_layout(&self) -> FieldLayout {
        FieldLayout::from_config(&self.config, self.paddle.pos.y)
    }

    /// Replace the field wholesale and announce every new block
    pub fn regenerate_field(&mut self) -> Result<(), SimError> {
        let layout = self.field_layout();
        let field = field::generate(&layout, self.next_id, &mut self.rng)?;
        self.next_id += field.len() as u32;
        self.generation += 1;

        self.events
            .extend(field.blocks().iter().map(|&block| GameEvent::BlockCreated { block }));
        if self.generation > 1 {
            self.events.push(GameEvent::FieldRegenerated {
                generation: self.generation,
            });
            log::info!("Field cleared, generated field #{}", self.generation);
        }
        self.field = field;
        Ok(())
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain.
    ///
    /// Hosts drain once per frame; the queue is not bounded otherwise.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let mut game = Game::new(GameConfig::default(), 42).unwrap();

        assert_eq!(game.state.lives, 3);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.phase(), GamePhase::Active);
        assert_eq!(game.field.len(), 16 * 20);
        assert_eq!(game.ball.pos, Vec3::new(0.0, 50.0, 150.0));
        assert_eq!(game.ball.vel, Vec3::new(1.0, 0.0, -5.0));

        let events = game.drain_events();
        let created = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BlockCreated { .. }))
            .count();
        assert_eq!(created, 320);
        assert!(events.contains(&GameEvent::LivesChanged { lives: 3 }));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_regenerate_keeps_ids_unique() {
        let mut game = Game::new(GameConfig::default(), 7).unwrap();
        let last_first = game.field.blocks().last().unwrap().id;

        game.regenerate_field().unwrap();
        assert_eq!(game.generation, 2);
        assert!(game.field.blocks()[0].id > last_first);
    }

    #[test]
    fn test_block_field_remove() {
        let block = |id| Block {
            id,
            row: 0,
            col: id,
            pos: Vec3::ZERO,
            half_width: 10.0,
            half_height: 10.0,
            half_depth: 5.0,
            special: false,
            variant: 0,
        };
        let mut field = BlockField::from_blocks(vec![block(3), block(1), block(2)]);

        assert_eq!(field.blocks()[0].id, 1);
        assert_eq!(field.remove(2).map(|b| b.id), Some(2));
        assert!(field.remove(2).is_none());
        assert_eq!(field.blocks().iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            width_choices: Vec::new(),
            ..Default::default()
        };
        assert!(Game::new(config, 1).is_err());
    }

    #[test]
    fn test_event_serializes_tagged() {
        let json = serde_json::to_string(&GameEvent::GameOver { final_score: 120 }).unwrap();
        assert_eq!(json, r#"{"type":"GameOver","final_score":120}"#);
    }
}
