//! Cat Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use cat_runner::consts::SIM_DT;
    use cat_runner::persistence::LocalStorageStore;
    use cat_runner::platform::InputLatch;
    use cat_runner::renderer::{build_scene, canvas};
    use cat_runner::sim::{GameEvent, autopilot};
    use cat_runner::{FrameDriver, Settings, Tuning};

    /// Game instance holding all host state
    struct Game {
        driver: FrameDriver<LocalStorageStore>,
        latch: InputLatch,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                driver: FrameDriver::new(Tuning::default(), seed, LocalStorageStore::default()),
                latch: InputLatch::new(settings.bindings.clone()),
                settings,
                ctx,
                last_time: 0.0,
            }
        }

        /// Step the simulation for one animation frame
        fn update(&mut self, dt: f32) {
            let mut input = self.latch.sample();
            if self.latch.autopilot {
                input = autopilot::plan(self.driver.state());
            }

            if self.settings.fixed_timestep {
                self.driver.advance(dt, &input);
            } else {
                self.driver.frame(&input);
            }

            for event in &self.driver.state().events {
                if let GameEvent::GameOver { score, new_best } = event {
                    log::info!("Round over: {} (new best: {})", score, new_best);
                }
            }
        }

        fn render(&self) {
            let scene = build_scene(&self.driver.snapshot(), &self.settings);
            canvas::paint(&self.ctx, &scene);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cat Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::default();
        canvas.set_width(tuning.field_width as u32);
        canvas.set_height(tuning.field_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings, ctx)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_focus_handlers(game.clone());

        game.borrow().render();
        request_animation_frame(game);

        log::info!("Cat Runner running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if g.settings.apply_key(&code, event.repeat()) {
                    g.settings.save();
                    event.prevent_default();
                    return;
                }
                if g.latch.key_down(&code, event.repeat()) {
                    // Keep Space/arrows from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().latch.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (tap to jump)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().latch.touch_start();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() == 0 {
                    game.borrow_mut().latch.touch_end();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Key-up events never arrive once focus is lost, so drop held keys
    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.latch.release_all();
                    // Don't replay the hidden interval on return
                    g.last_time = 0.0;
                    log::info!("Input released (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().latch.release_all();
                log::info!("Input released (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless autopilot run: `cat-runner [seed] [frames]`
///
/// Environment: `CAT_RUNNER_TUNING`, `CAT_RUNNER_BEST`, `CAT_RUNNER_SETTINGS`.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use cat_runner::persistence::{FileStore, ScoreStore};
    use cat_runner::sim::{GameEvent, autopilot};
    use cat_runner::{FrameDriver, Settings, Tuning};

    env_logger::init();
    log::info!("Cat Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60);

    let tuning = match std::env::var_os("CAT_RUNNER_TUNING") {
        Some(path) => Tuning::load_or_default(&PathBuf::from(path)),
        None => Tuning::default(),
    };
    let best_path = std::env::var_os("CAT_RUNNER_BEST")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("cat-runner-best.json"));

    let settings = match std::env::var_os("CAT_RUNNER_SETTINGS") {
        Some(path) => Settings::load_from(&PathBuf::from(path)),
        None => Settings::default(),
    };

    let mut driver = FrameDriver::new(tuning, seed, FileStore::new(best_path));

    let mut rounds = 0u32;
    let mut jumps = 0u32;
    let mut spawns: BTreeMap<&'static str, u32> = BTreeMap::new();

    for _ in 0..frames {
        let input = autopilot::plan(driver.state());
        driver.frame(&input);

        for event in &driver.state().events {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::Spawned { kind } => *spawns.entry(kind.as_str()).or_default() += 1,
                GameEvent::GameOver { score, new_best } => {
                    rounds += 1;
                    println!(
                        "round {:>3}: score {:>5}{}",
                        rounds,
                        score,
                        if *new_best { "  (new best)" } else { "" }
                    );
                    if settings.show_hitboxes {
                        // Headless stand-in for the overlay: dump the colliding frame
                        match driver.snapshot().to_json() {
                            Ok(json) => println!("{}", json),
                            Err(e) => log::warn!("Cannot encode snapshot: {}", e),
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let state = driver.state();
    println!(
        "seed {} | {} frames | {} rounds finished | best {} | {} jumps",
        seed,
        frames,
        rounds,
        state.best_score,
        jumps
    );
    for (kind, count) in &spawns {
        println!("  {:<10} {}", kind, count);
    }
    log::info!(
        "Best score on disk: {} ({})",
        driver.store().load(),
        driver.store().path().display()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
