//! Skyhop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, PointerEvent};

    use skyhop::consts::SIM_DT;
    use skyhop::persistence::LocalStore;
    use skyhop::platform::{RawInput, UiButton};
    use skyhop::sim::SessionListener;
    use skyhop::view::{Hud, Scene};
    use skyhop::{Game, Settings, Tuning};

    /// Logs lifecycle events to the browser console
    struct ConsoleListener;

    impl SessionListener for ConsoleListener {
        fn on_start(&mut self) {
            log::info!("Run started");
        }

        fn on_game_over(&mut self, final_score: u32, best_score: u32) {
            log::info!("Game over: {} (best {})", final_score, best_score);
        }
    }

    /// Browser app: the game plus presentation-local state
    struct App {
        game: Game,
        scene: Scene,
        last_time: f64,
    }

    impl App {
        fn update(&mut self, dt: f32) {
            self.game.frame(dt, &mut ConsoleListener);
            self.scene.advance_frame();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = Hud::from_snapshot(&self.game.snapshot());

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = document.get_element_by_id("bestScore") {
                el.set_text_content(Some(&hud.best));
            }
            set_hidden(&document, "startScreen", !hud.show_start);
            match &hud.game_over {
                Some((final_line, best_line)) => {
                    if let Some(el) = document.get_element_by_id("finalScore") {
                        el.set_text_content(Some(final_line));
                    }
                    if let Some(el) = document.get_element_by_id("highScore") {
                        el.set_text_content(Some(best_line));
                    }
                    set_hidden(&document, "gameOver", false);
                }
                None => set_hidden(&document, "gameOver", true),
            }
        }
    }

    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Skyhop starting...");

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load(&LocalStore);
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, Tuning::default(), Box::new(LocalStore)),
            scene: Scene::new(settings, seed ^ 0x9e37_79b9),
            last_time: 0.0,
        }));

        setup_input_handlers(app.clone());
        app.borrow().update_hud();
        request_animation_frame(app);

        log::info!("Skyhop running!");
    }

    fn forward(app: &Rc<RefCell<App>>, raw: RawInput) -> bool {
        app.borrow_mut().game.handle(&raw)
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if forward(&app, RawInput::key(&event.code(), &event.key())) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer on the play area
        if let Some(canvas) = document.get_element_by_id("gameCanvas") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                forward(&app, RawInput::PointerDown);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Start / restart buttons
        for (id, button) in [("startBtn", UiButton::Start), ("restartBtn", UiButton::Restart)] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    forward(&app, RawInput::Button(button));
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use skyhop::consts::SIM_DT;
    use skyhop::persistence::FileStore;
    use skyhop::sim::{Phase, SessionListener};
    use skyhop::view::{Hud, Scene};
    use skyhop::{Game, Settings, Tuning};

    /// Default number of frames for a demo run (one minute at 60 Hz)
    const DEFAULT_FRAMES: u64 = 60 * 60;

    /// Tallies the demo's runs
    #[derive(Default)]
    struct DemoListener {
        runs: u32,
        best_run: u32,
    }

    impl SessionListener for DemoListener {
        fn on_start(&mut self) {
            self.runs += 1;
        }

        fn on_score(&mut self, score: u32) {
            log::debug!("Score: {}", score);
        }

        fn on_game_over(&mut self, final_score: u32, best_score: u32) {
            self.best_run = self.best_run.max(final_score);
            log::info!(
                "Run {} over: {} (best {})",
                self.runs,
                final_score,
                best_score
            );
        }
    }

    fn load_tuning() -> Result<Tuning, String> {
        match std::env::var("SKYHOP_TUNING") {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read {}: {}", path, e))?;
                let tuning = Tuning::from_json(&json).map_err(|e| format!("{}: {}", path, e))?;
                log::info!("Loaded tuning from {}", path);
                Ok(tuning)
            }
            Err(_) => Ok(Tuning::default()),
        }
    }

    /// `skyhop [seed] [frames]`: play an autopilot demo without a window
    pub fn run() -> Result<(), String> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(s) => s.parse::<u64>().map_err(|_| format!("invalid seed: {}", s))?,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0),
        };
        let frames = match args.next() {
            Some(s) => s.parse::<u64>().map_err(|_| format!("invalid frame count: {}", s))?,
            None => DEFAULT_FRAMES,
        };

        let data_path =
            std::env::var("SKYHOP_DATA").unwrap_or_else(|_| "skyhop_data.json".to_string());
        let store = FileStore::new(&data_path);
        let settings = Settings::load(&store);
        let tuning = load_tuning()?;

        log::info!("Skyhop (headless) seed {} for {} frames", seed, frames);

        let mut game = Game::new(seed, tuning, Box::new(store));
        game.autopilot = true;
        let mut scene = Scene::new(settings, seed.rotate_left(17));
        let mut listener = DemoListener::default();

        for _ in 0..frames {
            game.frame(SIM_DT, &mut listener);
            scene.advance_frame();
        }

        let snapshot = game.snapshot();
        let hud = Hud::from_snapshot(&snapshot);
        println!("Runs played:   {}", listener.runs);
        println!("Best this run: {}", listener.best_run);
        if snapshot.phase == Phase::Running {
            println!("Current score: {}", hud.score);
        }
        println!("{}", hud.best);
        println!("Saved to:      {}", data_path);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
