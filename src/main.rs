//! Dino Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use dino_runner::hud;
    use dino_runner::leaderboard::{LeaderboardView, PlayerName, ScoreService};
    use dino_runner::renderer::RenderState;
    use dino_runner::sim::{GameState, RunPhase, TickOutcome, tick};
    use dino_runner::{GameError, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: RenderState,
        scores: ScoreService,
        board: LeaderboardView,
        /// A frame callback is pending; at most one chain runs at a time
        loop_scheduled: bool,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, render_state: RenderState) -> Self {
            Self {
                state: GameState::new(seed, tuning),
                render_state,
                scores: ScoreService::from_env(),
                board: LeaderboardView::new(),
                loop_scheduled: false,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            match self.render_state.render(&self.state) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    self.render_state
                        .resize(self.render_state.size.0, self.render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = document() else { return };

            set_text(&document, "hud-score", &hud::score_label(self.state.score));
            set_text(&document, "hud-level", &hud::level_label(self.state.level));

            set_hidden(&document, "start-overlay", self.state.phase != RunPhase::Idle);
            set_hidden(&document, "game-over", self.state.phase != RunPhase::Ended);

            if let Some(summary) = self.state.summary {
                set_text(&document, "final-score", &summary.score.to_string());
                set_text(&document, "final-level", &summary.level.to_string());
            }
        }

        /// Sync the leaderboard panel and save form with board state
        fn update_board(&self) {
            let Some(document) = document() else { return };

            set_hidden(&document, "name-form", self.board.visible);
            set_hidden(&document, "leaderboard", !self.board.visible);
            set_text(&document, "toggle-board-btn", hud::toggle_label(self.board.visible));
            update_save_button(&document, &self.board);
            set_text(&document, "leaderboard-status", hud::board_status(&self.board));

            let Some(list) = document.get_element_by_id("leaderboard-list") else { return };
            list.set_inner_html("");
            for (index, entry) in self.board.entries.iter().enumerate() {
                if let Ok(item) = document.create_element("li") {
                    item.set_text_content(Some(&hud::board_line(index, entry)));
                    let _ = list.append_child(&item);
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle only the `hidden` class; layout classes stay
    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_class_name(&hud::with_class(&el.class_name(), hud::HIDDEN_CLASS, hidden));
        }
    }

    fn name_input(document: &Document) -> Option<HtmlInputElement> {
        document.get_element_by_id("player-name")?.dyn_into().ok()
    }

    /// Save is enabled for a valid name, once per run
    fn update_save_button(document: &Document, board: &LeaderboardView) {
        let valid_name = name_input(document)
            .map(|input| PlayerName::new(&input.value()).is_ok())
            .unwrap_or(false);
        if let Some(btn) = document
            .get_element_by_id("save-btn")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            btn.set_disabled(!valid_name || !board.can_save());
            btn.set_text_content(Some(hud::save_label(board.has_saved())));
        }
    }

    pub async fn run() -> Result<(), GameError> {
        log::info!("Dino Runner starting...");

        let window = web_sys::window().ok_or_else(|| GameError::Setup("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::Setup("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| GameError::Setup("no #canvas element".into()))?
            .dyn_into()
            .map_err(|_| GameError::Setup("#canvas is not a canvas".into()))?;

        let tuning = Tuning::load();

        // Backing store at device resolution, field aspect preserved
        let dpr = window.device_pixel_ratio();
        let width = (tuning.field_width as f64 * dpr) as u32;
        let height = (tuning.field_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::Setup(format!("no drawing surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::Setup(format!("no graphics adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (tuning.field_width, tuning.field_height),
        )
        .await?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, render_state)));
        log::info!("Game initialized with seed: {}", seed);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Set up menu buttons
        setup_buttons(game.clone());

        // First frame: idle field behind the start overlay
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
            g.update_board();
        }

        refresh_leaderboard(game);

        log::info!("Dino Runner ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: Space / ArrowUp jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.code().as_str(), "Space" | "ArrowUp")
                    && game.borrow_mut().state.jump()
                {
                    event.prevent_default();
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Click on the play surface
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Name typing toggles the save button
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(document) = document() {
                    update_save_button(&document, &game.borrow().board);
                }
            });
            if let Some(input) = document().and_then(|d| d.get_element_by_id("player-name")) {
                let _ = input
                    .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    /// Schedule the next frame unless a chain is already pending
    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_scheduled {
                return;
            }
            g.loop_scheduled = true;
        }
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.loop_scheduled = false;

            // Stopped between frames: schedule nothing
            if !g.state.is_running() {
                return;
            }

            let outcome = tick(&mut g.state);
            g.render();
            g.update_hud();

            if let TickOutcome::Ended(summary) = outcome {
                log::info!("Game over: score {} level {}", summary.score, summary.level);
                g.update_board();
            }
            outcome.keep_running()
        };

        if keep_running {
            request_animation_frame(game);
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        // Start button (Idle -> Running)
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let started = game.borrow_mut().state.start();
                if started {
                    game.borrow().update_hud();
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Play again (Ended -> Running)
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let restarted = {
                    let mut g = game.borrow_mut();
                    let ok = g.state.restart(seed);
                    if ok {
                        g.board.reset_for_run();
                        g.update_hud();
                        g.update_board();
                    }
                    ok
                };
                if restarted {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Leaderboard toggle
        if let Some(btn) = document.get_element_by_id("toggle-board-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.board.toggle();
                g.update_board();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Save score
        if let Some(btn) = document.get_element_by_id("save-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                save_score(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Save the finished run once, then refresh and reveal the board
    fn save_score(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };
        let Some(name) = name_input(&document).and_then(|input| PlayerName::new(&input.value()).ok())
        else {
            return;
        };

        let (scores, summary) = {
            let mut g = game.borrow_mut();
            let Some(summary) = g.state.summary else { return };
            if !g.board.begin_save() {
                return;
            }
            g.update_board();
            (g.scores.clone(), summary)
        };

        wasm_bindgen_futures::spawn_local(async move {
            let ok = scores.save_score(&name, summary.score, summary.level).await;
            let refreshed = if ok {
                Some(scores.try_fetch_top_scores().await)
            } else {
                None
            };

            let mut g = game.borrow_mut();
            g.board.finish_save(ok);
            if let Some(result) = refreshed {
                g.board.finish_load(result);
            }
            g.update_board();
        });
    }

    /// Fetch the board in the background; never blocks a run
    fn refresh_leaderboard(game: Rc<RefCell<Game>>) {
        let scores = {
            let mut g = game.borrow_mut();
            g.board.begin_load();
            g.scores.clone()
        };

        wasm_bindgen_futures::spawn_local(async move {
            let result = scores.try_fetch_top_scores().await;
            let mut g = game.borrow_mut();
            g.board.finish_load(result);
            g.update_board();
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    if let Err(e) = wasm_game::run().await {
        log::error!("Dino Runner failed to start: {}", e);
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("setup-error"))
        {
            el.set_text_content(Some(&e.to_string()));
            el.set_class_name(&dino_runner::hud::with_class(
                &el.class_name(),
                dino_runner::hud::HIDDEN_CLASS,
                false,
            ));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Runner (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let summary = headless::autoplay(seed, dino_runner::Tuning::load(), 20_000);
    println!(
        "Seed {}: score {} level {} ({} ticks)",
        seed, summary.score, summary.level, summary.ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dino_runner::Tuning;
    use dino_runner::sim::{GameState, ObstacleKind, RunSummary, TickOutcome, tick};

    /// Play one seeded run with a simple bot: jump when a cactus is about
    /// four ticks away, never jump under a bird
    pub fn autoplay(seed: u64, tuning: Tuning, max_ticks: u64) -> RunSummary {
        let mut state = GameState::new(seed, tuning);
        state.start();

        while state.time_ticks < max_ticks {
            let front = state.player.x + state.player.width;
            let next = state
                .obstacles
                .iter()
                .find(|o| o.x + o.width() > state.player.x);
            if let Some(obstacle) = next {
                let gap = obstacle.x - front;
                if matches!(obstacle.kind, ObstacleKind::Ground { .. }) && gap <= state.speed * 4.0 {
                    state.jump();
                }
            }

            if let TickOutcome::Ended(summary) = tick(&mut state) {
                return summary;
            }
        }

        log::info!("Tick cap {} reached", max_ticks);
        RunSummary {
            score: state.score,
            level: state.level,
            ticks: state.time_ticks,
        }
    }
}
