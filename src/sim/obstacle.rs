//! Gapped obstacles and the field that spawns, scrolls and reaps them

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::PLAY_WIDTH;
use crate::tuning::Tuning;

/// A vertical obstacle with a single opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    /// Height of the upper segment; the gap starts here
    pub gap_top: f32,
    /// Where the lower segment starts; always `gap_top + gap`
    pub gap_bottom: f32,
    /// Set once the trailing edge has passed the actor
    pub scored: bool,
    /// Cosmetic hue in degrees
    pub hue: f32,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, gap_top: f32, gap: f32, hue: f32) -> Self {
        Self {
            x,
            width,
            gap_top,
            gap_bottom: gap_top + gap,
            scored: false,
            hue,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Trailing edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Owns the active obstacles and the random source that places them
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
    /// Ticks counted toward the next spawn
    spawn_counter: u32,
    width: f32,
    gap: f32,
    speed: f32,
    min_segment: f32,
    max_gap_top: f32,
    spawn_interval: u32,
    first_spawn_counter: u32,
}

impl ObstacleField {
    /// Field seeded for a reproducible obstacle sequence
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning)
    }

    /// Field drawing from `rng`. An invalid tuning falls back to the defaults.
    pub fn with_rng(rng: Pcg32, tuning: &Tuning) -> Self {
        let tuning = tuning.clone().or_default();
        Self {
            obstacles: Vec::new(),
            rng,
            spawn_counter: tuning.first_spawn_counter(),
            width: tuning.obstacle_width,
            gap: tuning.gap,
            speed: tuning.obstacle_speed,
            min_segment: tuning.min_segment,
            max_gap_top: tuning.max_gap_top(),
            spawn_interval: tuning.spawn_interval,
            first_spawn_counter: tuning.first_spawn_counter(),
        }
    }

    /// Active obstacles, oldest (leftmost) first
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Ticks counted toward spawning; a multiple of the interval means a spawn
    pub fn spawn_counter(&self) -> u32 {
        self.spawn_counter
    }

    /// Drop every obstacle and rewind the spawn counter so the first spawn
    /// comes early
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_counter = self.first_spawn_counter;
    }

    /// Count one tick; spawns when the counter lands on the interval.
    /// Returns true if an obstacle was spawned.
    pub fn on_tick(&mut self) -> bool {
        self.spawn_counter += 1;
        if self.spawn_counter.is_multiple_of(self.spawn_interval) {
            self.spawn();
            true
        } else {
            false
        }
    }

    /// Place a new obstacle at the right edge with a random gap height
    pub fn spawn(&mut self) {
        let gap_top = self
            .rng
            .random_range(self.min_segment..=self.max_gap_top);
        let hue = self.rng.random_range(100.0..160.0);

        log::debug!("Spawned obstacle: gap_top={:.1}", gap_top);
        self.obstacles
            .push(Obstacle::new(PLAY_WIDTH, self.width, gap_top, self.gap, hue));
    }

    /// Scroll every obstacle left by the fixed speed
    pub fn advance(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }
    }

    /// Mark every unscored obstacle whose trailing edge is behind `actor_x`.
    /// Returns how many were newly marked.
    pub fn mark_scored(&mut self, actor_x: f32) -> u32 {
        let mut newly_scored = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.scored && obstacle.right() < actor_x {
                obstacle.scored = true;
                newly_scored += 1;
            }
        }
        newly_scored
    }

    /// Remove obstacles whose trailing edge has left the play area
    pub fn reap_offscreen(&mut self) {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.right() >= 0.0);
        let reaped = before - self.obstacles.len();
        if reaped > 0 {
            log::debug!("Reaped {} obstacle(s)", reaped);
        }
    }

    /// Insert an obstacle directly (tests and scripted scenes)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}
