//! Axis-aligned bounding box collision
//!
//! Every entity in the runner is a rectangle, so one overlap test covers
//! player vs. cactus and player vs. bird alike.

use serde::{Deserialize, Serialize};

/// Axis-aligned box, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap on both axes; touching edges do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Check the player's box against one obstacle box
#[inline]
pub fn check_collision(player: &Aabb, obstacle: &Aabb) -> bool {
    player.overlaps(obstacle)
}
