//! Swarm Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use swarm_invaders::renderer::RenderState;
    use swarm_invaders::sim::{GameEvent, Simulation};
    use swarm_invaders::{FrameDriver, FrameStatus, Hud, Intent, Settings};

    type Driver = FrameDriver<RenderState, DomHud>;

    /// Pushes HUD values into the page's text elements
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, value: impl ToString) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(&value.to_string()));
            }
        }

        fn set_overlay_visible(&self, visible: bool) {
            let Some(el) = self.document.get_element_by_id("gameOver") else {
                return;
            };
            if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
                let display = if visible { "block" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
        }
    }

    impl Hud for DomHud {
        fn on_event(&mut self, event: &GameEvent) {
            match *event {
                GameEvent::ScoreChanged(score) => self.set_text("score", score),
                GameEvent::LivesChanged(lives) => self.set_text("lives", lives),
                GameEvent::LevelChanged(level) => self.set_text("level", level),
                GameEvent::GameOver { final_score } => {
                    self.set_text("finalScore", final_score);
                    self.set_overlay_visible(true);
                }
                GameEvent::Restarted => self.set_overlay_visible(false),
                GameEvent::PauseChanged(_) => {}
            }
        }
    }

    /// Map a key to a movement/fire/pause intent
    fn key_intent(key: &str, pressed: bool) -> Option<Intent> {
        match key {
            "ArrowLeft" => Some(Intent::MoveLeft { active: pressed }),
            "ArrowRight" => Some(Intent::MoveRight { active: pressed }),
            " " if pressed => Some(Intent::Fire),
            "p" | "P" if pressed => Some(Intent::TogglePause),
            _ => None,
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Swarm Invaders starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("gameCanvas")
            .map(|el| el.dyn_into::<HtmlCanvasElement>())
        {
            Some(Ok(canvas)) => canvas,
            _ => {
                log::error!("No #gameCanvas canvas element");
                return;
            }
        };

        let settings = Settings::default();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        // Drawing buffer follows the displayed size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let render_state = match init_renderer(&instance, canvas, width, height).await {
            Ok(state) => state,
            Err(e) => {
                log::error!("Renderer init failed: {}", e);
                return;
            }
        };

        let hud = DomHud {
            document: document.clone(),
        };
        let driver = FrameDriver::new(Simulation::new(&settings, seed), render_state, hud);
        let driver = Rc::new(RefCell::new(driver));

        setup_input_handlers(driver.clone());
        setup_restart_button(&document, driver.clone());

        request_animation_frame(driver);

        log::info!("Swarm Invaders running!");
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, swarm_invaders::renderer::RenderError> {
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);
        RenderState::new(surface, &adapter, width, height).await
    }

    fn setup_input_handlers(driver: Rc<RefCell<Driver>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: movement start, fire, pause
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    event.prevent_default();
                }
                if let Some(intent) = key_intent(&event.key(), true) {
                    driver.borrow_mut().handle_intent(intent);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: movement stop
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(intent) = key_intent(&event.key(), false) {
                    driver.borrow_mut().handle_intent(intent);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, driver: Rc<RefCell<Driver>>) {
        let Some(btn) = document.get_element_by_id("restart-btn") else {
            log::warn!("No restart button found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let resumed = driver.borrow_mut().handle_intent(Intent::Restart);
            // The loop stopped at game over; kick it off again
            if resumed {
                request_animation_frame(driver.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(driver: Rc<RefCell<Driver>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(driver);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(driver: Rc<RefCell<Driver>>) {
        let status = driver.borrow_mut().frame();
        if status == FrameStatus::Continue {
            request_animation_frame(driver);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use swarm_invaders::autopilot::Autopilot;
    use swarm_invaders::driver::{LogHud, NullRenderer};
    use swarm_invaders::sim::Simulation;
    use swarm_invaders::{FrameDriver, FrameStatus, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Swarm Invaders (native, headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!("Seed: {}", seed);

    let mut driver = FrameDriver::new(Simulation::new(&settings, seed), NullRenderer, LogHud);
    let mut pilot = Autopilot::new();

    while driver.frames() < settings.headless_frames {
        for intent in pilot.intents(driver.sim(), driver.frames() + 1) {
            driver.handle_intent(intent);
        }
        if driver.frame() == FrameStatus::Stop {
            break;
        }
    }

    let state = &driver.sim().state;
    let summary = serde_json::json!({
        "seed": seed,
        "frames": driver.frames(),
        "score": state.score,
        "level": state.level,
        "lives": state.lives,
        "phase": state.phase,
    });
    println!("{}", summary);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
