//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (keyboard, pointer, on-screen buttons)
//! - Time (fixed-step clock fed by frame deltas)

pub mod clock;
pub mod input;

pub use clock::FixedStep;
pub use input::{Action, RawInput, UiButton, map_input};
