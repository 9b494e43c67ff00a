//! Collision detection between the actor and the world
//!
//! Everything here is a pure function of its inputs: the actor's box, the
//! obstacle set and the two horizontal boundaries (ground and ceiling).
//! Screen coordinates are used throughout, so "up" is smaller `y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Upper edge (smallest y)
    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Lower edge (largest y)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap of horizontal spans (touching edges do not overlap)
    #[inline]
    pub fn overlaps_horizontally(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }
}

/// What the actor ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Ground,
    Ceiling,
    /// Index into the obstacle slice that was hit
    Obstacle { index: usize },
}

/// First surface the actor is touching, checked ground, ceiling, then obstacles
/// in order
pub fn first_contact(
    actor: &Aabb,
    obstacles: &[Obstacle],
    ground_y: f32,
    ceiling_y: f32,
) -> Option<Contact> {
    if actor.bottom() >= ground_y {
        return Some(Contact::Ground);
    }
    if actor.top() <= ceiling_y {
        return Some(Contact::Ceiling);
    }

    obstacles
        .iter()
        .position(|obstacle| {
            actor.overlaps_horizontally(obstacle.left(), obstacle.right())
                && (actor.top() < obstacle.gap_top || actor.bottom() > obstacle.gap_bottom)
        })
        .map(|index| Contact::Obstacle { index })
}

/// True if the actor touches the ground, the ceiling or a solid obstacle segment
#[inline]
pub fn detect(actor: &Aabb, obstacles: &[Obstacle], ground_y: f32, ceiling_y: f32) -> bool {
    first_contact(actor, obstacles, ground_y, ceiling_y).is_some()
}
