//! Lane Dodge entry point
//!
//! The browser build wires the canvas, DOM controls and `requestAnimationFrame`
//! to the frame driver. The native build runs a headless autopilot session
//! and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, HtmlInputElement};

    use lane_dodge::platform::input::{command_for_key, command_for_speed};
    use lane_dodge::platform::web::{CanvasSurface, DomScoreSink};
    use lane_dodge::{Command, Game, GameConfig, LoopControl};

    /// Game instance plus its browser collaborators
    struct App {
        game: Game,
        surface: CanvasSurface,
        score: DomScoreSink,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Lane Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let score_el: HtmlElement = document
            .get_element_by_id("scoreDisplay")
            .ok_or("no score display")?
            .dyn_into()?;

        let mut config = GameConfig::default();
        config.playfield.width = canvas.width() as f32;
        config.playfield.height = canvas.height() as f32;
        let seed = js_sys::Date::now() as u64;

        let mut game = Game::new(config, seed);

        // Pick up the slider's initial value before the first session
        if let Some(slider) = speed_slider(&document) {
            if let Some(command) = command_for_speed(&slider.value()) {
                game.push(command);
            }
        }
        game.start();
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            surface: CanvasSurface::new(&canvas)?,
            score: DomScoreSink::new(score_el),
        }));

        setup_keyboard(app.clone());
        setup_speed_slider(&document, app.clone());
        setup_reset_button(&document, app.clone());

        request_animation_frame(app);
        log::info!("Lane Dodge running!");
        Ok(())
    }

    fn speed_slider(document: &web_sys::Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("speedRange")?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let control = {
            let mut guard = app.borrow_mut();
            let App {
                game,
                surface,
                score,
            } = &mut *guard;
            game.frame(surface, score)
        };

        if control == LoopControl::Continue {
            request_animation_frame(app);
        }
    }

    /// Queue a command; wake the loop if it had halted
    fn dispatch(app: &Rc<RefCell<App>>, command: Command) {
        let wake = app.borrow_mut().game.push(command);
        if wake {
            request_animation_frame(app.clone());
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(command) = command_for_key(&event.key()) {
                event.prevent_default();
                dispatch(&app, command);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_speed_slider(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        let Some(slider) = speed_slider(document) else {
            log::warn!("No speed control found");
            return;
        };
        let input = slider.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(command) = command_for_speed(&input.value()) {
                dispatch(&app, command);
            }
        });
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("resetButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                dispatch(&app, Command::Reset);
                log::info!("Reset requested");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use serde::Serialize;

    use lane_dodge::autopilot::autopilot;
    use lane_dodge::platform::headless::{RecordingSurface, ScoreLine};
    use lane_dodge::sim::GamePhase;
    use lane_dodge::{Game, GameConfig, LoopControl};

    /// Upper bound on frames for one headless run (about five minutes at 60 Hz)
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        speed: u8,
        frames: u64,
        score: u64,
        game_over: bool,
    }

    fn load_config() -> GameConfig {
        let Some(path) = std::env::args().nth(1) else {
            return GameConfig::default();
        };
        match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}; using default config", e);
                GameConfig::default()
            }
        }
    }

    pub fn run() {
        let config = load_config();
        let seed = config.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        log::info!("Headless run with seed {}", seed);

        let mut game = Game::new(config, seed);
        game.start();

        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();
        while game.state().frame_count < MAX_FRAMES {
            if let Some(command) = autopilot(game.state()) {
                game.push(command);
            }
            if game.frame(&mut surface, &mut score) == LoopControl::Halt {
                break;
            }
        }

        let state = game.state();
        let summary = RunSummary {
            seed,
            speed: state.speed.get(),
            frames: state.frame_count,
            score: state.score().floor() as u64,
            game_over: state.phase == GamePhase::GameOver,
        };
        log::info!("{} after {} frames", score.text(), summary.frames);
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Dodge (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
