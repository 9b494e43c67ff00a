//! Frame driver
//!
//! Owns the session, the fixed-step clock and the best-score store. Hosts
//! forward input with `press`/`handle` and call `frame` once per rendered
//! frame; everything else happens in here.

use crate::persistence::{BestScore, KeyValueStore};
use crate::platform::{Action, FixedStep, RawInput, map_input};
use crate::sim::{GameEvent, Session, SessionListener, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game {
    session: Session,
    clock: FixedStep,
    store: Box<dyn KeyValueStore>,
    best: BestScore,
    /// One-shot input waiting for the next tick
    input: TickInput,
    /// Demo mode - the session plays itself
    pub autopilot: bool,
}

impl Game {
    /// Load the stored best score and set up an idle session
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        let best = BestScore::load(store.as_ref());
        log::info!("Game initialized with seed: {}", seed);
        Self {
            session: Session::new(seed, best.value(), tuning),
            clock: FixedStep::default(),
            store,
            best,
            input: TickInput::default(),
            autopilot: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn best_score(&self) -> u32 {
        self.best.value()
    }

    pub fn press(&mut self, action: Action) {
        match action {
            Action::Primary => self.input.primary = true,
        }
    }

    /// Translate and apply a raw host event. Returns false if it was ignored.
    pub fn handle(&mut self, raw: &RawInput) -> bool {
        match map_input(raw) {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    /// Run however many ticks `dt` seconds of wall time are worth
    pub fn frame<L: SessionListener + ?Sized>(
        &mut self,
        dt: f32,
        listener: &mut L,
    ) -> Vec<GameEvent> {
        let steps = self.clock.advance(dt);
        self.run(steps, listener)
    }

    /// Run exactly one tick (hosts that tick once per frame themselves)
    pub fn step<L: SessionListener + ?Sized>(&mut self, listener: &mut L) -> Vec<GameEvent> {
        self.run(1, listener)
    }

    fn run<L: SessionListener + ?Sized>(
        &mut self,
        steps: u32,
        listener: &mut L,
    ) -> Vec<GameEvent> {
        for _ in 0..steps {
            let input = TickInput {
                autopilot: self.autopilot,
                ..std::mem::take(&mut self.input)
            };
            tick(&mut self.session, &input);
        }

        let mut persisting = Persisting {
            best: &mut self.best,
            store: self.store.as_mut(),
            inner: listener,
        };
        self.session.dispatch_events(&mut persisting)
    }
}

/// Writes a new best to storage before the host's listener hears of it
struct Persisting<'a, L: ?Sized> {
    best: &'a mut BestScore,
    store: &'a mut dyn KeyValueStore,
    inner: &'a mut L,
}

impl<L: SessionListener + ?Sized> SessionListener for Persisting<'_, L> {
    fn on_start(&mut self) {
        self.inner.on_start();
    }

    fn on_score(&mut self, score: u32) {
        self.inner.on_score(score);
    }

    fn on_game_over(&mut self, final_score: u32, best_score: u32) {
        self.best.record(self.store, final_score);
        self.inner.on_game_over(final_score, best_score);
    }
}
