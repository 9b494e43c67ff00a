//! Skyhop - a one-button side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, obstacles, collisions, session state)
//! - `game`: Frame driver tying the simulation to a clock and best-score storage
//! - `platform`: Input adapter and fixed-step clock
//! - `persistence`: Key-value storage and best score
//! - `tuning`: Data-driven game balance
//! - `view`: Presentation-local helpers (animation, clouds, HUD text)

pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Play-area configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;
    /// Ground band at the bottom of the play area
    pub const GROUND_HEIGHT: f32 = 60.0;
    pub const GROUND_Y: f32 = PLAY_HEIGHT - GROUND_HEIGHT;
    pub const CEILING_Y: f32 = 0.0;
}
