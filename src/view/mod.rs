//! Presentation-side helpers
//!
//! State that only matters for drawing: animation phases, scenery and HUD
//! text. Nothing here feeds back into the simulation.

pub mod hud;
pub mod scenery;

pub use hud::{Hud, fit_scale};
pub use scenery::{Cloud, CloudLayer, Scene, WingFlap};
