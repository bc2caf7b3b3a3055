//! Axis-aligned collision detection
//!
//! The player collides through an inset hitbox, smaller than its sprite, so
//! grazing a hazard with the sprite's edge is forgiven.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};

/// Axis-aligned rectangle (top-left + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            size: self.size - Vec2::splat(2.0 * margin),
        }
    }

    /// Strict overlap; shared edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Collision box of the player
pub fn player_hitbox(player: &Player, inset: f32) -> Rect {
    player.bounds().inset(inset)
}

/// Index of the first obstacle (in spawn order) hit by `hitbox`
pub fn first_hit(hitbox: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| hitbox.overlaps(&o.bounds()))
}
