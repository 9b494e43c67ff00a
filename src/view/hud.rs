//! HUD text and window fitting

use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH};
use crate::sim::{Phase, Snapshot};

/// Margin kept around the play area when scaling to the window
const WINDOW_MARGIN: f32 = 40.0;

/// Uniform scale that fits the play area (plus margin) inside a window
pub fn fit_scale(window_width: f32, window_height: f32) -> f32 {
    let scale_x = window_width / (PLAY_WIDTH + WINDOW_MARGIN);
    let scale_y = window_height / (PLAY_HEIGHT + WINDOW_MARGIN);
    scale_x.min(scale_y)
}

/// Text shown over the play area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// Running score
    pub score: String,
    /// Best score on the start screen
    pub best: String,
    /// Game-over panel lines, only once the run has ended
    pub game_over: Option<(String, String)>,
    /// Whether the start screen is up
    pub show_start: bool,
}

impl Hud {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            score: snapshot.score.to_string(),
            best: format!("Best Score: {}", snapshot.best_score),
            game_over: snapshot.final_score.map(|final_score| {
                (
                    format!("Score: {}", final_score),
                    format!("Best: {}", snapshot.best_score),
                )
            }),
            show_start: snapshot.phase == Phase::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Session, TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_fit_scale_picks_tighter_axis() {
        assert_eq!(fit_scale(840.0, 640.0), 1.0);
        assert_eq!(fit_scale(1680.0, 640.0), 1.0);
        assert_eq!(fit_scale(420.0, 1280.0), 0.5);
    }

    #[test]
    fn test_hud_through_a_run() {
        let mut session = Session::new(1, 3, Tuning::default());
        let hud = Hud::from_snapshot(&session.snapshot());
        assert!(hud.show_start);
        assert_eq!(hud.best, "Best Score: 3");
        assert_eq!(hud.game_over, None);

        session.start();
        let hud = Hud::from_snapshot(&session.snapshot());
        assert!(!hud.show_start);
        assert_eq!(hud.score, "0");

        while session.phase() == Phase::Running {
            tick(&mut session, &TickInput::default());
        }
        let hud = Hud::from_snapshot(&session.snapshot());
        assert_eq!(
            hud.game_over,
            Some(("Score: 0".to_string(), "Best: 3".to_string()))
        );
    }
}
