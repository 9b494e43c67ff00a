//! The player-controlled actor
//!
//! Velocity changes only through gravity or a jump impulse; position changes
//! only through velocity integration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

/// The falling, flapping actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Centre of the bounding box
    pub pos: Vec2,
    /// Vertical velocity (positive is downward)
    pub velocity: f32,
    pub size: Vec2,
    /// Display tilt derived from velocity (radians)
    pub rotation: f32,
    gravity: f32,
    jump_impulse: f32,
    rotation_factor: f32,
    max_rotation: f32,
}

impl Actor {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.actor_x, tuning.actor_start_y),
            velocity: 0.0,
            size: Vec2::new(tuning.actor_width, tuning.actor_height),
            rotation: 0.0,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            rotation_factor: tuning.rotation_factor,
            max_rotation: tuning.max_rotation,
        }
    }

    /// Put the actor back at its start height, at rest
    pub fn reset(&mut self, start_y: f32) {
        self.pos.y = start_y;
        self.velocity = 0.0;
        self.rotation = 0.0;
    }

    #[inline]
    pub fn apply_gravity(&mut self) {
        self.velocity += self.gravity;
    }

    /// Overrides velocity with the upward impulse
    #[inline]
    pub fn jump(&mut self) {
        self.velocity = self.jump_impulse;
    }

    #[inline]
    pub fn integrate(&mut self) {
        self.pos.y += self.velocity;
    }

    /// Nose up when rising, down when falling
    pub fn update_rotation(&mut self) {
        self.rotation =
            (self.velocity * self.rotation_factor).clamp(-self.max_rotation, self.max_rotation);
    }

    /// Axis-aligned box around the actor centre
    pub fn current_bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}
