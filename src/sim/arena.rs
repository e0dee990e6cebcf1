//! Arena geometry: paddle, side walls and ceiling
//!
//! Every static piece is an axis-aligned box described by its center and
//! half extents. The arena is laid out on the X/Z plane with the paddle at
//! the near (+Z) end and the ceiling closing the far (-Z) end.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    /// Build from a center and full box dimensions
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half_extents: size / 2.0,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Closest point inside the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min(), self.max())
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Box center; only X moves, and only through the input mapper
    pub pos: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec3::new(PADDLE_X, PADDLE_Y, PADDLE_Z),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            depth: PADDLE_DEPTH,
        }
    }
}

impl Paddle {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Y of the paddle's top face
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// Z past which the ball counts as out
    #[inline]
    pub fn exit_z(&self) -> f32 {
        self.pos.z + 2.0 * self.depth
    }

    /// Is `p` inside the paddle's width band, depth band and under its top face
    pub fn contains_band(&self, p: Vec3) -> bool {
        let half_depth = self.depth / 2.0;
        (p.z >= self.pos.z - half_depth && p.z <= self.pos.z + half_depth)
            && (p.x >= self.pos.x - self.half_width() && p.x <= self.pos.x + self.half_width())
            && p.y <= self.top()
    }

    /// Where a fresh ball is served from
    pub fn spawn_point(&self) -> Vec3 {
        Vec3::new(PADDLE_X, self.pos.y, self.pos.z - BALL_SPAWN_OFFSET_Z)
    }
}

/// Static bounds of the play volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub left_wall: Aabb,
    pub right_wall: Aabb,
    pub ceiling: Aabb,
}

impl Arena {
    /// Lay out walls and ceiling around a paddle
    pub fn around(paddle: &Paddle) -> Self {
        let wall_size = Vec3::new(WALL_WIDTH, WALL_HEIGHT, WALL_DEPTH);
        let wall_z = paddle.pos.z - WALL_OFFSET_Z;
        Self {
            left_wall: Aabb::from_size(
                Vec3::new(paddle.pos.x - WALL_OFFSET_X, paddle.pos.y, wall_z),
                wall_size,
            ),
            right_wall: Aabb::from_size(
                Vec3::new(paddle.pos.x + WALL_OFFSET_X, paddle.pos.y, wall_z),
                wall_size,
            ),
            ceiling: Aabb::from_size(
                Vec3::new(paddle.pos.x, paddle.pos.y, paddle.pos.z - CEILING_OFFSET_Z),
                Vec3::new(CEILING_WIDTH, CEILING_HEIGHT, CEILING_DEPTH),
            ),
        }
    }

    /// X of the left wall's inner (right-hand) face
    #[inline]
    pub fn left_face(&self) -> f32 {
        self.left_wall.max().x
    }

    /// X of the right wall's inner (left-hand) face
    #[inline]
    pub fn right_face(&self) -> f32 {
        self.right_wall.min().x
    }

    /// Z of the ceiling's inner (paddle-facing) face
    #[inline]
    pub fn ceiling_face(&self) -> f32 {
        self.ceiling.max().z
    }
}
