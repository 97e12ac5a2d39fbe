//! Classic Pong entry point
//!
//! Handles platform-specific initialization and drives the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use classic_pong::renderer::CanvasSurface;
    use classic_pong::sim::{InputEvent, Score, key_direction};
    use classic_pong::{GameLoop, ScoreSink, Settings, StopHandle};

    thread_local! {
        static STOP: RefCell<Option<StopHandle>> = const { RefCell::new(None) };
    }

    /// Score display backed by two DOM elements
    struct DomScoreSink {
        player: Element,
        computer: Element,
    }

    impl ScoreSink for DomScoreSink {
        fn update(&mut self, score: Score) {
            self.player.set_text_content(Some(&score.player.to_string()));
            self.computer.set_text_content(Some(&score.computer.to_string()));
        }
    }

    /// Game instance shared with the event listeners
    struct Game {
        game_loop: GameLoop<DomScoreSink>,
        surface: CanvasSurface,
    }

    /// Stop the game loop; the current frame finishes and no more are scheduled
    pub fn stop() {
        STOP.with(|stop| {
            if let Some(handle) = stop.borrow().as_ref() {
                handle.stop();
                log::info!("Stop requested by host");
            }
        });
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("pong")
            .ok_or_else(|| JsValue::from_str("no #pong canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let element = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("no #{id} element")))
        };
        let sink = DomScoreSink {
            player: element("playerScore")?,
            computer: element("computerScore")?,
        };

        // The canvas's intrinsic size is the field
        let settings = Settings::load().with_field_size(canvas.width() as f32, canvas.height() as f32);
        settings
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = js_sys::Date::now() as u64;
        let game_loop = GameLoop::new(seed, &settings, sink);
        STOP.with(|stop| *stop.borrow_mut() = Some(game_loop.stop_handle()));

        let game = Rc::new(RefCell::new(Game {
            game_loop,
            surface: CanvasSurface::new(ctx),
        }));

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game)?;

        log::info!("Classic Pong running (seed {})", seed);
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Mouse move - absolute position relative to the canvas top
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().game_loop.post(InputEvent::PointerMoved { y });
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = key_direction(&event.code()) {
                    game.borrow_mut().game_loop.post(InputEvent::KeyDown(direction));
                }
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = key_direction(&event.code()) {
                    game.borrow_mut().game_loop.post(InputEvent::KeyUp(direction));
                }
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let running = {
            let mut g = game.borrow_mut();
            let Game { game_loop, surface } = &mut *g;
            game_loop.frame(surface)
        };

        if !running {
            log::info!("Game loop stopped");
            return;
        }
        if let Err(e) = request_animation_frame(game) {
            log::error!("Failed to schedule next frame: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }

    log::info!("Classic Pong starting...");
    wasm_game::run().inspect_err(|e| log::error!("Startup failed: {:?}", e))
}

/// Stop the game loop from JavaScript
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_game() {
    wasm_game::stop();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use classic_pong::renderer::CommandRecorder;
    use classic_pong::score::LogScoreSink;
    use classic_pong::{GameLoop, Settings};

    /// One minute of play at 60 Hz
    const HEADLESS_FRAMES: u64 = 60 * 60;
    const HEADLESS_SEED: u64 = 2024;

    env_logger::init();
    log::info!("Classic Pong (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    let settings = Settings::load();
    if let Err(e) = settings.validate() {
        log::error!("{e}");
        std::process::exit(1);
    }

    let mut game = GameLoop::new(HEADLESS_SEED, &settings, LogScoreSink);
    let mut surface = CommandRecorder::new();
    let frames = game.run_frames(HEADLESS_FRAMES, &mut surface);
    game.stop();

    log::info!("Ran {} frames", frames);
    match serde_json::to_string_pretty(&game.state().snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
