//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without touching the simulation. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GROUND_Y, PLAY_WIDTH};

/// Errors produced while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Velocity added every tick while running
    pub gravity: f32,
    /// Velocity set (not added) by a jump; negative is upward
    pub jump_impulse: f32,
    /// Fixed horizontal centre of the actor
    pub actor_x: f32,
    /// Vertical centre the actor is reset to on start
    pub actor_start_y: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    pub obstacle_width: f32,
    /// Vertical opening of every obstacle
    pub gap: f32,
    /// Leftward movement per tick
    pub obstacle_speed: f32,
    /// Ticks between spawns in steady state
    pub spawn_interval: u32,
    /// How many ticks earlier than `spawn_interval` the first obstacle arrives
    pub first_spawn_lead: u32,
    /// Minimum height of both the top and bottom segment
    pub min_segment: f32,
    /// Tilt per unit of velocity
    pub rotation_factor: f32,
    /// Tilt clamp (radians)
    pub max_rotation: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: -12.0,
            actor_x: 150.0,
            actor_start_y: 300.0,
            actor_width: 60.0,
            actor_height: 45.0,
            obstacle_width: 90.0,
            gap: 220.0,
            obstacle_speed: 3.0,
            spawn_interval: 80,
            first_spawn_lead: 20,
            min_segment: 80.0,
            rotation_factor: 0.05,
            max_rotation: std::f32::consts::FRAC_PI_4,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject geometries the simulation cannot honour
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_interval == 0 {
            return Err(TuningError::Invalid("spawn_interval must be positive"));
        }
        if self.first_spawn_lead >= self.spawn_interval {
            return Err(TuningError::Invalid(
                "first_spawn_lead must be smaller than spawn_interval",
            ));
        }
        if self.obstacle_speed <= 0.0 {
            return Err(TuningError::Invalid("obstacle_speed must be positive"));
        }
        if self.gap <= self.actor_height {
            return Err(TuningError::Invalid("gap must be taller than the actor"));
        }
        if self.max_gap_top() < self.min_segment {
            return Err(TuningError::Invalid(
                "gap and min_segment do not fit above the ground",
            ));
        }
        if self.actor_x <= 0.0 || self.actor_x >= PLAY_WIDTH {
            return Err(TuningError::Invalid("actor_x must be inside the play area"));
        }
        Ok(())
    }

    /// This tuning if it validates, otherwise the defaults
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Largest gap-top height that still leaves `min_segment` above the ground
    #[inline]
    pub fn max_gap_top(&self) -> f32 {
        GROUND_Y - self.gap - self.min_segment
    }

    /// Spawn counter value after a (re)start
    #[inline]
    pub fn first_spawn_counter(&self) -> u32 {
        self.spawn_interval.saturating_sub(self.first_spawn_lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.first_spawn_counter(), 60);
        assert_eq!(tuning.max_gap_top(), 240.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "spawn_interval": 100 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.spawn_interval, 100);
        assert_eq!(tuning.jump_impulse, -12.0);
        assert_eq!(tuning.first_spawn_counter(), 80);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            Tuning::from_json("{ gravity: "),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_impossible_gap_rejected() {
        let result = Tuning::from_json(r#"{ "gap": 500.0 }"#);
        assert!(matches!(result, Err(TuningError::Invalid(_))));

        let result = Tuning::from_json(r#"{ "spawn_interval": 10, "first_spawn_lead": 10 }"#);
        assert!(matches!(result, Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_lead_past_interval_does_not_underflow() {
        let tuning = Tuning {
            spawn_interval: 10,
            first_spawn_lead: 20,
            ..Default::default()
        };
        assert_eq!(tuning.first_spawn_counter(), 0);
        assert_eq!(tuning.or_default(), Tuning::default());
    }

    #[test]
    fn test_valid_tuning_kept() {
        let tuning = Tuning {
            gap: 400.0,
            min_segment: 20.0,
            ..Default::default()
        };
        assert_eq!(tuning.clone().or_default(), tuning);
    }
}
