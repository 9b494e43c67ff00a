//! Session state and lifecycle
//!
//! The `Session` is the single writer of all simulation state. Hosts drive it
//! through `start`, `jump`, `primary_action` and `tick`, and read it back
//! through `snapshot` and the queued `GameEvent`s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::Contact;
use super::obstacle::{Obstacle, ObstacleField};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first start input
    #[default]
    Idle,
    /// Physics, spawning and collision checks active
    Running,
    /// Run over; waiting for restart
    Ended,
}

/// Lifecycle notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Scored {
        score: u32,
    },
    GameOver {
        final_score: u32,
        best_score: u32,
        /// The run beat the previous best
        new_best: bool,
    },
}

/// Callback-style consumer of `GameEvent`s. Every hook defaults to a no-op.
pub trait SessionListener {
    fn on_start(&mut self) {}
    fn on_score(&mut self, _score: u32) {}
    fn on_game_over(&mut self, _final_score: u32, _best_score: u32) {}
}

/// Hosts with nothing to notify
impl SessionListener for () {}

/// Route events to the matching listener callbacks, in order
pub fn dispatch<L: SessionListener + ?Sized>(events: &[GameEvent], listener: &mut L) {
    for event in events {
        match *event {
            GameEvent::Started => listener.on_start(),
            GameEvent::Scored { score } => listener.on_score(score),
            GameEvent::GameOver {
                final_score,
                best_score,
                ..
            } => listener.on_game_over(final_score, best_score),
        }
    }
}

/// Read-only view of a frame, for drawing
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub actor_pos: Vec2,
    pub actor_size: Vec2,
    pub actor_rotation: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub best_score: u32,
    /// Only present once the run has ended
    pub final_score: Option<u32>,
}

/// One play session: the actor, the obstacles and the score bookkeeping
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed of the obstacle sequence
    pub seed: u64,
    tuning: Tuning,
    phase: Phase,
    score: u32,
    best_score: u32,
    pub(super) actor: Actor,
    pub(super) field: ObstacleField,
    /// A jump requested since the last tick
    pub(super) jump_queued: bool,
    /// What ended the last run
    last_contact: Option<Contact>,
    events: Vec<GameEvent>,
}

impl Session {
    /// New idle session. `best_score` is whatever persistence recovered.
    /// A tuning that fails validation is replaced by the defaults.
    pub fn new(seed: u64, best_score: u32, tuning: Tuning) -> Self {
        let tuning = tuning.or_default();
        Self {
            seed,
            actor: Actor::new(&tuning),
            field: ObstacleField::new(seed, &tuning),
            tuning,
            phase: Phase::Idle,
            score: 0,
            best_score,
            jump_queued: false,
            last_contact: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Spawn-cadence counter; reset to `interval - lead` on every start
    pub fn tick_count(&self) -> u32 {
        self.field.spawn_counter()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    pub fn last_contact(&self) -> Option<Contact> {
        self.last_contact
    }

    /// Begin a run from Idle or Ended. Ignored while already running.
    pub fn start(&mut self) {
        if self.phase == Phase::Running {
            return;
        }
        self.actor.reset(self.tuning.actor_start_y);
        self.field.clear();
        self.score = 0;
        self.jump_queued = false;
        self.last_contact = None;
        self.phase = Phase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Run started (best {})", self.best_score);
    }

    /// Queue a flap for the next tick. Only meaningful while running.
    pub fn jump(&mut self) {
        if self.phase == Phase::Running {
            self.jump_queued = true;
        }
    }

    /// The single player button: start/restart when not running, flap otherwise
    pub fn primary_action(&mut self) {
        match self.phase {
            Phase::Idle | Phase::Ended => self.start(),
            Phase::Running => self.jump(),
        }
    }

    /// Count a newly cleared obstacle
    pub(super) fn add_point(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::Scored { score: self.score });
    }

    /// Running -> Ended
    pub(super) fn end_run(&mut self, contact: Contact) {
        let new_best = self.score > self.best_score;
        self.best_score = self.best_score.max(self.score);
        self.phase = Phase::Ended;
        self.jump_queued = false;
        self.last_contact = Some(contact);
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
            best_score: self.best_score,
            new_best,
        });
        log::info!(
            "Game over: {:?}, score {} (best {}{})",
            contact,
            self.score,
            self.best_score,
            if new_best { ", new best" } else { "" }
        );
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain queued events into listener callbacks, returning them as well
    pub fn dispatch_events<L: SessionListener + ?Sized>(
        &mut self,
        listener: &mut L,
    ) -> Vec<GameEvent> {
        let events = self.drain_events();
        dispatch(&events, listener);
        events
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            actor_pos: self.actor.pos,
            actor_size: self.actor.size,
            actor_rotation: self.actor.rotation,
            obstacles: self.field.obstacles().to_vec(),
            score: self.score,
            best_score: self.best_score,
            final_score: (self.phase == Phase::Ended).then_some(self.score),
        }
    }
}
