//! Square vs Triangles entry point
//!
//! Browser: WebGPU canvas, keyboard input and the animation-frame loop.
//! Native: a headless run of the simulation driven by the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use square_vs_triangles::autopilot::autopilot;
    use square_vs_triangles::consts::{FIRST_FRAME_DT, MAX_FRAME_DT};
    use square_vs_triangles::renderer::{Hud, RenderState, build_scene};
    use square_vs_triangles::sim::{GameEvent, GameState, tick};
    use square_vs_triangles::{MoveIntent, intent_off, intent_on};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        intent: MoveIntent,
        /// Bot plays instead of the keyboard
        idle_mode: bool,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                intent: MoveIntent::default(),
                idle_mode: false,
                last_time: 0.0,
            }
        }

        /// Run one simulation step for this animation frame
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                FIRST_FRAME_DT
            };
            self.last_time = time;
            let dt = dt.clamp(0.0, MAX_FRAME_DT);

            let intent = if self.idle_mode {
                autopilot(&self.state)
            } else {
                self.intent
            };
            tick(&mut self.state, &intent, dt);

            for event in &self.state.events {
                if let GameEvent::PlayerDied { survived } = event {
                    log::info!(
                        "Game over after {:.1}s with {} enemies on the field",
                        survived,
                        self.state.enemies.len()
                    );
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = Hud::from_state(&self.state);

            if let Some(el) = document.get_element_by_id("hud-health") {
                el.set_text_content(Some(&hud.health));
            }
            if let Some(el) = document.get_element_by_id("hud-enemies") {
                el.set_text_content(Some(&hud.enemies));
            }
            if let Some(el) = document.get_element_by_id("hud-time") {
                el.set_text_content(Some(&hud.survived));
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                match hud.game_over {
                    Some(text) => {
                        el.set_text_content(Some(&text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Square vs Triangles starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No <canvas id=\"canvas\"> element");
                return;
            }
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let screen = game.borrow().state.tuning.screen();
        match RenderState::new(surface, &adapter, width, height, screen).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        }

        setup_input_handlers(&window, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Square vs Triangles running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down: raise intent flags, toggle idle mode
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if intent_on(&mut g.intent, &key) {
                    event.prevent_default();
                } else if !event.repeat() && (key == "i" || key == "I") {
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: lower intent flags
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if intent_off(&mut g.intent, &event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events are lost, release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().intent.clear();
                log::info!("Input released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Context;
    use clap::Parser;

    use square_vs_triangles::autopilot::autopilot;
    use square_vs_triangles::renderer::Hud;
    use square_vs_triangles::sim::{GameEvent, GameState, tick};
    use square_vs_triangles::{MoveIntent, Tuning};

    /// Run the simulation without a window and report how long the player lasted.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct CliArgs {
        /// Tuning overrides as JSON (missing fields keep their defaults)
        #[arg(value_name = "TUNING_JSON")]
        tuning: Option<PathBuf>,
        /// Simulated seconds to run before stopping
        #[arg(long, value_name = "SECONDS", default_value_t = 60.0, value_parser = parse_seconds)]
        seconds: f32,
        /// Simulated frames per second
        #[arg(
            long,
            value_name = "FPS",
            default_value_t = 60,
            value_parser = clap::value_parser!(u32).range(1..=1000)
        )]
        fps: u32,
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Stand still instead of letting the autopilot dodge
        #[arg(long)]
        idle: bool,
        /// Print the final world snapshot as JSON
        #[arg(long)]
        json: bool,
    }

    /// Run length must be a positive, finite number of seconds
    fn parse_seconds(arg: &str) -> Result<f32, String> {
        let seconds: f32 = arg.parse().map_err(|e| format!("{e}"))?;
        if seconds.is_finite() && seconds > 0.0 {
            Ok(seconds)
        } else {
            Err(format!("expected a positive number of seconds, got {seconds}"))
        }
    }

    pub fn run(args: CliArgs) -> anyhow::Result<()> {
        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Tuning::from_json(&json).with_context(|| format!("loading {}", path.display()))?
            }
            None => Tuning::default(),
        };

        let seed = match args.seed {
            Some(seed) => seed,
            None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
        };

        let mut state = GameState::with_tuning(seed, tuning)?;
        log::info!("Headless run: seed {}, {}s at {} fps", seed, args.seconds, args.fps);

        let dt = 1.0 / args.fps as f32;
        let frames = (args.seconds * args.fps as f32).ceil() as u64;
        let mut hits = 0u32;

        for _ in 0..frames {
            let intent = if args.idle {
                MoveIntent::default()
            } else {
                autopilot(&state)
            };
            tick(&mut state, &intent, dt);

            for event in &state.events {
                match event {
                    GameEvent::EnemySpawned { id, pos } => {
                        log::info!("[{:6.2}s] enemy {} at ({:.0}, {:.0})", state.elapsed, id, pos.x, pos.y);
                    }
                    GameEvent::SpeedEscalated { speed } => {
                        log::debug!("[{:6.2}s] speed {:.1}", state.elapsed, speed);
                    }
                    GameEvent::PlayerHit { health } => {
                        hits += 1;
                        log::info!("[{:6.2}s] hit! health {}", state.elapsed, health);
                    }
                    GameEvent::PlayerDied { survived } => {
                        log::info!("[{:6.2}s] player died", survived);
                    }
                    GameEvent::ProjectileFired { .. } | GameEvent::ProjectileExpired { .. } => {}
                }
            }

            if state.is_game_over() {
                break;
            }
        }

        let hud = Hud::from_state(&state);
        println!("{} | {} | {}", hud.health, hud.enemies, hud.survived);
        println!("Hits taken: {}, speed x{:.2}", hits, state.speed_multiplier());
        if let Some(banner) = hud.game_over {
            println!("{banner}");
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        }

        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = headless::CliArgs::parse();
    if let Err(e) = headless::run(args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
