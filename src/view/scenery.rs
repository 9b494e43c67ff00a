//! Animated scenery: wing flapping and drifting clouds

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH};
use crate::settings::Settings;
use crate::sim::Snapshot;

/// Wing animation phase, advanced once per rendered frame
#[derive(Debug, Clone, Copy, Default)]
pub struct WingFlap {
    phase: f32,
}

impl WingFlap {
    /// Phase step per frame (radians)
    pub const STEP: f32 = 0.1;

    pub fn advance(&mut self) {
        self.phase = (self.phase + Self::STEP) % TAU;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Wing displacement in [-0.5, 0.5]
    pub fn offset(&self) -> f32 {
        self.phase.sin() * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub speed: f32,
}

/// Background clouds with their own RNG, independent of obstacle placement
#[derive(Debug, Clone)]
pub struct CloudLayer {
    clouds: Vec<Cloud>,
    rng: Pcg32,
}

impl CloudLayer {
    pub const COUNT: usize = 5;

    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = (0..Self::COUNT)
            .map(|_| Cloud {
                x: rng.random_range(0.0..PLAY_WIDTH),
                y: rng.random_range(0.0..PLAY_HEIGHT / 3.0),
                width: rng.random_range(80.0..150.0),
                speed: rng.random_range(0.5..1.2),
            })
            .collect();
        Self { clouds, rng }
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    /// Drift left; clouds that leave re-enter past the right edge at a new height
    pub fn advance(&mut self) {
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
            if cloud.x + cloud.width < 0.0 {
                cloud.x = PLAY_WIDTH + cloud.width;
                cloud.y = self.rng.random_range(0.0..PLAY_HEIGHT / 3.0);
            }
        }
    }
}

/// Per-frame presentation state, gated by the player's settings
#[derive(Debug, Clone)]
pub struct Scene {
    pub settings: Settings,
    pub wings: WingFlap,
    pub clouds: CloudLayer,
}

impl Scene {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            wings: WingFlap::default(),
            clouds: CloudLayer::new(seed),
        }
    }

    /// Animate one rendered frame. Runs in every phase, unlike the simulation.
    pub fn advance_frame(&mut self) {
        if self.settings.effective_wing_animation() {
            self.wings.advance();
        }
        if self.settings.clouds {
            self.clouds.advance();
        }
    }

    /// Tilt to draw the actor with
    pub fn actor_tilt(&self, snapshot: &Snapshot) -> f32 {
        if self.settings.effective_tilt() {
            snapshot.actor_rotation
        } else {
            0.0
        }
    }

    /// Clouds to draw this frame
    pub fn visible_clouds(&self) -> &[Cloud] {
        if self.settings.clouds {
            self.clouds.clouds()
        } else {
            &[]
        }
    }
}
