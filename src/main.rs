//! DODGE.exe entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use dodge::audio::AudioManager;
    use dodge::error::ConfigResult;
    use dodge::platform::{InputState, KeyAction};
    use dodge::renderer::vertex::colors;
    use dodge::renderer::{RenderState, build_scene, death_shake};
    use dodge::sim::{GameEvent, GameMode, GameState, Snapshot, TickOutcome, tick};
    use dodge::{HighScore, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        audio: AudioManager,
        render_state: Option<RenderState>,
        document: Document,
    }

    impl Game {
        /// Advance one frame at the host timestamp `now`
        fn frame(&mut self, now: f64) {
            let input = self.input.take();
            if input.start || input.toggle_mute || input.toggle_invulnerable {
                // Browsers only allow audio after a user gesture
                self.audio.resume();
            }

            if tick(&mut self.state, &input, now) == TickOutcome::BackToMenu {
                log::debug!("Death effect finished");
            }

            for event in self.state.drain_events() {
                if let GameEvent::Died { new_best: true, .. } = event {
                    self.state.best.save();
                }
                self.audio.handle(&event);
            }

            let snap = Snapshot::capture(&self.state, now);
            self.render(&snap);
            self.update_hud(&snap);
        }

        /// Render the current frame
        fn render(&mut self, snap: &Snapshot) {
            let shake = snap
                .death_progress
                .map(|p| death_shake(p, &mut rand::rng()))
                .unwrap_or(Vec2::ZERO);
            let vertices = build_scene(snap, shake);

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
        fn update_hud(&self, snap: &Snapshot) {
            let doc = &self.document;
            let in_run = snap.mode != GameMode::Menu;

            set_visible(doc, "hud", in_run);
            set_text(doc, "hud-time", &snap.time_label());
            set_text(doc, "hud-phase", &snap.phase_label());
            if let Some(el) = doc.get_element_by_id("hud-phase") {
                let _ = el.set_attribute("style", &format!("color: {}", colors::phase_css(snap.phase)));
            }
            set_visible(doc, "hud-muted", snap.muted);
            set_visible(doc, "hud-god", snap.invulnerable);

            // Menu
            set_visible(doc, "menu", !in_run);
            set_visible(doc, "menu-latest", snap.latest_score.is_some());
            if let Some(latest) = snap.latest_score {
                set_text(doc, "menu-latest", &format!("LATEST: {latest:.1}s"));
            }
            set_text(doc, "menu-best", &format!("BEST: {:.1}s", snap.high_score));

            // Phase overlay
            set_visible(doc, "overlay", snap.transition.is_some());
            if let Some(phase) = snap.transition {
                set_text(doc, "overlay-phase", &format!("PHASE {}", phase.number()));
                set_text(doc, "overlay-name", phase.title());
            }

            // Death caption pulses while the effect plays
            set_visible(doc, "dead", snap.mode == GameMode::Dead);
            if let (Some(elapsed), Some(el)) = (snap.death_elapsed_ms, doc.get_element_by_id("dead")) {
                let alpha = (elapsed * 0.015).sin() * 0.3 + 0.7;
                let _ = el.set_attribute("style", &format!("opacity: {alpha:.2}"));
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Optional JSON config embedded in the page as
    /// `<script type="application/json" id="...">`
    fn read_config<T: Default>(
        document: &Document,
        id: &str,
        parse: impl Fn(&str) -> ConfigResult<T>,
    ) -> T {
        let Some(json) = document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
        else {
            return T::default();
        };

        match parse(&json) {
            Ok(value) => {
                log::info!("Loaded #{id}");
                value
            }
            Err(e) => {
                log::warn!("Ignoring #{id}: {e}");
                T::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("DODGE.exe starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = read_config(&document, "dodge-tuning", Tuning::from_json);
        let settings = read_config(&document, "dodge-settings", Settings::from_json);
        let arena = Vec2::new(tuning.arena_width, tuning.arena_height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed, tuning, HighScore::load());
        state.muted = settings.start_muted;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            input: InputState::default(),
            audio: AudioManager::new(settings),
            render_state: None,
            document: document.clone(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, arena).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("DODGE.exe running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(action) = KeyAction::from_key(&event.key()) else {
                    return;
                };
                if action.prevents_default() {
                    event.prevent_default();
                }
                game.borrow_mut().input.key_down(action, event.repeat());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(action) = KeyAction::from_key(&event.key()) {
                    game.borrow_mut().input.key_up(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events never arrive for keys held while switching away
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("DODGE.exe (native) starting...");
    log::info!("Native mode runs a headless autoplay session - run with `trunk serve` to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    autoplay::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session driven by a simple evasive bot
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use glam::Vec2;

    use dodge::consts::FRAME_MS;
    use dodge::sim::{GameEvent, GameState, TickInput, TickOutcome, tick};
    use dodge::{HighScore, Tuning};

    /// Give up after this much simulated time
    const MAX_SECS: f64 = 300.0;
    /// Enemies farther than this are ignored
    const DANGER_RADIUS: f32 = 80.0;

    pub fn run(seed: u64) {
        let mut state = GameState::new(seed, Tuning::default(), HighScore::load());
        let start = TickInput {
            start: true,
            ..Default::default()
        };

        let mut now = 0.0;
        tick(&mut state, &start, now);

        while now < MAX_SECS * 1000.0 {
            now += FRAME_MS;
            let input = steer(&state);
            let outcome = tick(&mut state, &input, now);

            for event in state.drain_events() {
                match event {
                    GameEvent::PhaseChanged { phase } => {
                        println!("{:>6.1}s  phase {} ({})", state.survived_secs, phase.number(), phase.name());
                    }
                    GameEvent::Died { score, new_best } => {
                        println!(
                            "{:>6.1}s  hit by one of {} enemies{}",
                            score,
                            state.enemies.len(),
                            if new_best { " - new best" } else { "" }
                        );
                    }
                    _ => {}
                }
            }

            if outcome == TickOutcome::Died {
                break;
            }
        }

        println!(
            "Seed {seed}: survived {:.1}s, reached phase {}",
            state.survived_secs,
            state.phase.number()
        );
    }

    /// Push away from nearby enemies, with a weak pull back to the middle
    fn steer(state: &GameState) -> TickInput {
        let half = Vec2::splat(state.player.size / 2.0);
        let center = state.player.pos + half;

        let mut push = (state.bounds() / 2.0 - center) * 1e-5;
        for enemy in &state.enemies {
            let away = center - (enemy.pos + Vec2::splat(enemy.size / 2.0));
            let dist_sq = away.length_squared().max(1.0);
            if dist_sq < DANGER_RADIUS * DANGER_RADIUS {
                push += away / dist_sq;
            }
        }

        const DEADZONE: f32 = 1e-4;
        TickInput {
            left: push.x < -DEADZONE,
            right: push.x > DEADZONE,
            up: push.y < -DEADZONE,
            down: push.y > DEADZONE,
            ..Default::default()
        }
    }
}
