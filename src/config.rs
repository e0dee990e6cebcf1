//! Game tuning
//!
//! Constructor-time constants for a session. Hosts may hand in JSON to
//! override any field; everything else falls back to the defaults.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::FieldLayout;

/// How the resolver decides that the ball touched a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HitTest {
    /// Center-to-center distance below `ball radius + block half depth`.
    /// Wide blocks are under-detected at their far edges.
    #[default]
    CenterDistance,
    /// Closest point on the block box within the ball radius
    SphereBox,
}

/// Session tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Block field ===
    /// Rows of blocks (row 0 faces the paddle)
    pub rows: u32,
    /// Blocks per row
    pub cols: u32,
    /// Rows nearest the paddle that never hold a special block
    pub reserved_rows: u32,
    /// Special (extra life) blocks per field
    pub special_count: u32,
    /// Block widths, one drawn uniformly per block
    pub width_choices: Vec<f32>,
    pub block_height: f32,
    pub block_depth: f32,
    /// Left edge of each row on X
    pub field_start_x: f32,
    /// Depth of row 0
    pub field_start_z: f32,
    /// Depth step between consecutive rows
    pub row_spacing: f32,

    // === Ball ===
    /// Per-step displacement the ball is served with
    pub initial_velocity: Vec3,
    /// Speed ceiling, applied after every block hit
    pub max_speed: f32,
    /// Speed multiplier per destroyed block
    pub growth_factor: f32,
    pub hit_test: HitTest,

    // === Scoring ===
    pub starting_lives: u32,
    pub points_per_block: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 20,
            reserved_rows: 3,
            special_count: 2,
            width_choices: vec![20.0],
            block_height: 20.0,
            block_depth: 10.0,
            field_start_x: -200.0,
            field_start_z: -100.0,
            row_spacing: 0.5,

            initial_velocity: Vec3::new(1.0, 0.0, -5.0),
            max_speed: 10.0,
            growth_factor: 1.01,
            hit_test: HitTest::CenterDistance,

            starting_lives: 3,
            points_per_block: 10,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tuning that cannot produce a playable, bounded game
    pub fn validate(&self) -> Result<(), SimError> {
        // Field shape is checked where fields are generated
        FieldLayout::from_config(self, 0.0).validate()?;

        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(SimError::config(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        if !self.growth_factor.is_finite() || self.growth_factor < 1.0 {
            return Err(SimError::config(format!(
                "growth_factor must be >= 1, got {}",
                self.growth_factor
            )));
        }
        if !self.initial_velocity.is_finite() {
            return Err(SimError::config("initial_velocity must be finite"));
        }
        if self.initial_velocity.length() > self.max_speed {
            return Err(SimError::config(format!(
                "initial speed {} exceeds max_speed {}",
                self.initial_velocity.length(),
                self.max_speed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_infeasible_special_count() {
        let config = GameConfig {
            rows: 4,
            cols: 1,
            reserved_rows: 3,
            special_count: 2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimError::Configuration(_))));
    }

    #[test]
    fn test_field_checks_shared_with_generator() {
        let config = GameConfig {
            width_choices: vec![20.0, -1.0],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimError::Configuration(_))));

        let config = GameConfig {
            row_spacing: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_initial_speed_above_max() {
        let config = GameConfig {
            max_speed: 4.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "rows": 6, "hit_test": "SphereBox" }"#).unwrap();
        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, 20);
        assert_eq!(config.hit_test, HitTest::SphereBox);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            GameConfig::from_json("{ rows: "),
            Err(SimError::Json(_))
        ));
    }
}
