//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::collision::first_contact;
use super::state::{Phase, Session};
use crate::consts::{CEILING_Y, GROUND_Y};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Primary button (space/up/click): start, restart or flap
    pub primary: bool,
    /// Demo mode - the session plays itself
    pub autopilot: bool,
}

/// How far above the gap's lower edge the autopilot lets the actor sink
const AUTOPILOT_FLOOR_MARGIN: f32 = 25.0;

/// Advance the session by one tick.
///
/// Per-tick order while running: spawn cadence, gravity or jump, integration,
/// obstacle scroll, scoring, collision, then reaping. Reaping last keeps an
/// obstacle collidable on the tick it leaves the screen.
pub fn tick(session: &mut Session, input: &TickInput) {
    let mut primary = input.primary;
    if input.autopilot {
        primary |= autopilot_wants_primary(session);
    }
    if primary {
        session.primary_action();
    }

    // Idle and Ended frames only render
    if session.phase() != Phase::Running {
        return;
    }

    session.field.on_tick();

    if std::mem::take(&mut session.jump_queued) {
        session.actor.jump();
    } else {
        session.actor.apply_gravity();
    }
    session.actor.integrate();
    session.actor.update_rotation();

    session.field.advance();

    let cleared = session.field.mark_scored(session.actor.pos.x);
    for _ in 0..cleared {
        session.add_point();
    }

    let bounds = session.actor.current_bounds();
    if let Some(contact) = first_contact(&bounds, session.field.obstacles(), GROUND_Y, CEILING_Y) {
        session.end_run(contact);
        return;
    }

    session.field.reap_offscreen();
}

/// Demo-mode decision: press to (re)start, or flap when sinking toward the
/// lower edge of the next gap
fn autopilot_wants_primary(session: &Session) -> bool {
    if session.phase() != Phase::Running {
        return true;
    }

    let actor = session.actor();
    if session.jump_queued || actor.velocity < 0.0 {
        return false;
    }

    let bounds = actor.current_bounds();
    // Nearest obstacle the actor has not fully cleared yet
    let floor = session
        .obstacles()
        .iter()
        .filter(|o| o.right() >= bounds.left())
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|o| o.gap_bottom)
        .unwrap_or(session.tuning().actor_start_y + actor.size.y);

    bounds.bottom() > floor - AUTOPILOT_FLOOR_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Contact;
    use crate::sim::obstacle::Obstacle;
    use crate::sim::state::GameEvent;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running(seed: u64) -> Session {
        let mut session = Session::new(seed, 0, Tuning::default());
        session.start();
        session.drain_events();
        session
    }

    fn press() -> TickInput {
        TickInput {
            primary: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_ticks_do_nothing() {
        let mut session = Session::new(1, 0, Tuning::default());
        for _ in 0..10 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.actor().pos.y, 300.0);
        assert!(session.obstacles().is_empty());
    }

    #[test]
    fn test_primary_starts_and_runs_first_tick() {
        let mut session = Session::new(1, 0, Tuning::default());
        tick(&mut session, &press());
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.actor().velocity, 0.5);
        assert_eq!(session.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_free_fall_hits_ground_with_zero_score() {
        let mut session = running(3);
        let mut ticks = 0;
        while session.phase() == Phase::Running {
            tick(&mut session, &TickInput::default());
            ticks += 1;
            assert!(ticks < 1000);
        }
        // y = 300 + 0.5 * n(n+1)/2 reaches 517.5 (bottom edge 540) at n = 29
        assert_eq!(ticks, 29);
        assert_eq!(session.phase(), Phase::Ended);
        assert_eq!(session.score(), 0);
        assert_eq!(session.last_contact(), Some(Contact::Ground));
        assert_eq!(session.snapshot().final_score, Some(0));
    }

    #[test]
    fn test_ended_ticks_are_frozen() {
        let mut session = running(3);
        while session.phase() == Phase::Running {
            tick(&mut session, &TickInput::default());
        }
        let y = session.actor().pos.y;
        let xs: Vec<f32> = session.obstacles().iter().map(|o| o.x).collect();
        for _ in 0..5 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.actor().pos.y, y);
        let after: Vec<f32> = session.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, after);
    }

    #[test]
    fn test_jump_overrides_gravity_for_that_tick() {
        let mut session = running(1);
        for _ in 0..5 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.actor().velocity, 2.5);

        tick(&mut session, &press());
        assert_eq!(session.actor().velocity, -12.0);

        for _ in 0..24 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.actor().velocity, 0.0);
        tick(&mut session, &TickInput::default());
        assert_eq!(session.actor().velocity, 0.5);
    }

    #[test]
    fn test_spawn_cadence_after_restart() {
        let mut session = running(9);
        let mut spawn_ticks = Vec::new();
        for t in 1..=180u32 {
            // keep the actor aloft near the middle
            let input = TickInput {
                primary: session.actor().pos.y > 320.0 && session.actor().velocity > 0.0,
                ..Default::default()
            };
            let before = session.obstacles().len();
            tick(&mut session, &input);
            assert_eq!(session.phase(), Phase::Running);
            if session.obstacles().len() > before {
                spawn_ticks.push(t);
            }
        }
        assert_eq!(spawn_ticks, vec![20, 100, 180]);
    }

    #[test]
    fn test_scoring_happens_once_per_obstacle() {
        let mut session = running(1);
        // trailing edge at 153; two ticks of scrolling take it past x = 150
        session
            .field
            .push(Obstacle::new(63.0, 90.0, 100.0, 450.0, 120.0));

        tick(&mut session, &TickInput::default());
        assert_eq!(session.score(), 0);
        tick(&mut session, &TickInput::default());
        assert_eq!(session.score(), 1);
        for _ in 0..5 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.score(), 1);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Scored { score: 1 }]
        );
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut session = running(1);
        // gap far below the actor: the upper segment covers it
        session
            .field
            .push(Obstacle::new(140.0, 90.0, 400.0, 120.0, 120.0));
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase(), Phase::Ended);
        assert_eq!(
            session.last_contact(),
            Some(Contact::Obstacle { index: 0 })
        );
    }

    #[test]
    fn test_exiting_obstacle_scores_then_is_reaped() {
        let mut session = running(1);
        // after scrolling, this obstacle's trailing edge is at -1 and it is reaped
        session
            .field
            .push(Obstacle::new(-88.0, 90.0, 100.0, 220.0, 120.0));
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.obstacles().is_empty());
        // it still counted as cleared on its way out
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_collision_checked_before_reap() {
        // actor box spans x -10..50, so it still overlaps an exiting obstacle
        let tuning = Tuning {
            actor_x: 20.0,
            ..Default::default()
        };
        let mut session = Session::new(1, 0, tuning);
        session.start();
        // trailing edge lands at -1 after scrolling; the gap is below the actor
        session
            .field
            .push(Obstacle::new(-88.0, 90.0, 400.0, 120.0, 120.0));
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase(), Phase::Ended);
        assert_eq!(
            session.last_contact(),
            Some(Contact::Obstacle { index: 0 })
        );
        assert_eq!(session.obstacles().len(), 1);
    }

    #[test]
    fn test_restart_resets_run_state() {
        let mut session = running(1);
        session
            .field
            .push(Obstacle::new(63.0, 90.0, 100.0, 450.0, 120.0));
        while session.phase() == Phase::Running {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.score(), 1);
        assert_eq!(session.best_score(), 1);

        tick(&mut session, &press());
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.best_score(), 1);
        assert_eq!(session.actor().pos.y, 300.5);
        assert!(session.obstacles().is_empty());
        assert_eq!(session.tick_count(), 61);
    }

    #[test]
    fn test_autopilot_starts_and_flaps() {
        let mut session = Session::new(5, 0, Tuning::default());
        let demo = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut session, &demo);
        assert_eq!(session.phase(), Phase::Running);

        let mut flapped = false;
        for _ in 0..40 {
            tick(&mut session, &demo);
            if session.actor().velocity == -12.0 {
                flapped = true;
                break;
            }
        }
        assert!(flapped);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(99999, 0, Tuning::default());
        let mut b = Session::new(99999, 0, Tuning::default());
        let demo = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &demo);
            tick(&mut b, &demo);
        }
        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.actor().pos, b.actor().pos);
        assert_eq!(a.obstacles(), b.obstacles());
    }

    proptest! {
        #[test]
        fn prop_velocity_law(presses in proptest::collection::vec(any::<bool>(), 1..25)) {
            let mut session = running(11);
            for press in presses {
                let before = session.actor().velocity;
                tick(&mut session, &TickInput { primary: press, autopilot: false });
                if session.phase() != Phase::Running {
                    break;
                }
                let after = session.actor().velocity;
                if press {
                    prop_assert_eq!(after, -12.0);
                } else {
                    prop_assert_eq!(after, before + 0.5);
                }
            }
        }

        #[test]
        fn prop_best_score_is_max_of_runs(scores in proptest::collection::vec(0u32..8, 1..6)) {
            let mut session = Session::new(1, 0, Tuning::default());
            let mut last_best = 0;
            for target in &scores {
                session.start();
                for _ in 0..*target {
                    session.add_point();
                }
                session.end_run(Contact::Ground);
                prop_assert!(session.best_score() >= last_best);
                last_best = session.best_score();
            }
            prop_assert_eq!(session.best_score(), *scores.iter().max().unwrap());
        }
    }
}
