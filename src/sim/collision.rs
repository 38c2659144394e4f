//! Axis-aligned collision detection
//!
//! Everything in the playfield is an upright rectangle, so a strict AABB
//! overlap test is the whole collision model.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap on both axes; touching edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// First obstacle overlapping the vehicle, if any
pub fn first_hit<'a>(
    vehicle: &Aabb,
    obstacles: &'a [Obstacle],
    obstacle_size: Vec2,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|o| vehicle.overlaps(&o.aabb(obstacle_size)))
}
