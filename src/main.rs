//! RunnerX entry point
//!
//! Browser: paints to a 2D canvas once per animation frame and keeps the high
//! score in LocalStorage. Native: plays a headless session on autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use std::sync::mpsc::Sender;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use runnerx::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use runnerx::driver::{FrameHandle, FrameScheduler};
    use runnerx::host::{Host, HostInput, HostView};
    use runnerx::renderer::{Color, Surface};
    use runnerx::{Engine, EngineConfig, GameEvent, HighScores};

    type FrameCallback = Closure<dyn FnMut(f64)>;
    type GameEngine = Engine<CanvasSurface, Sender<GameEvent>, RafScheduler>;

    /// Canvas 2D context as a drawing surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        size: Vec2,
    }

    impl CanvasSurface {
        fn trace_ellipse(&self, center: Vec2, radii: Vec2) {
            self.ctx.begin_path();
            let _ = self.ctx.ellipse(
                center.x as f64,
                center.y as f64,
                radii.x as f64,
                radii.y as f64,
                0.0,
                0.0,
                TAU,
            );
        }
    }

    impl Surface for CanvasSurface {
        fn width(&self) -> f32 {
            self.size.x
        }

        fn height(&self) -> f32 {
            self.size.y
        }

        fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx
                .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
        }

        fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.trace_ellipse(center, radii);
            self.ctx.fill();
        }

        fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, line_width: f32) {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(line_width as f64);
            self.trace_ellipse(center, radii);
            self.ctx.stroke();
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32) {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(line_width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.stroke();
        }
    }

    /// requestAnimationFrame as the refresh signal
    struct RafScheduler {
        callback: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            let id = self
                .callback
                .borrow()
                .as_ref()
                .and_then(|cb| {
                    web_sys::window()?
                        .request_animation_frame(cb.as_ref().unchecked_ref())
                        .ok()
                })
                .unwrap_or_else(|| {
                    log::error!("requestAnimationFrame unavailable; loop stalled");
                    0
                });
            FrameHandle(id as u64)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle.0 as i32);
            }
        }
    }

    /// Refresh the score readout and overlay
    fn update_hud(document: &Document, host: &Host) {
        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&host.score_line()));
        }

        let Some(overlay) = document.get_element_by_id("overlay") else {
            return;
        };
        let message = match host.view() {
            HostView::Playing => {
                let _ = overlay.set_attribute("class", "hidden");
                return;
            }
            HostView::Menu => {
                "RunnerX\nPress SPACE or click to start\nSPACE, \u{2191} or click to jump".to_string()
            }
            HostView::GameOver {
                final_score,
                new_record,
            } => {
                let record = if new_record { "\nNew High Score!" } else { "" };
                format!("Game Over!\nScore: {final_score}{record}\nPress SPACE or click to restart")
            }
        };
        overlay.set_text_content(Some(&message));
        let _ = overlay.set_attribute("class", "overlay");
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("missing #canvas element")?
            .dyn_into()?;
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let surface = CanvasSurface {
            ctx,
            size: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        };
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            callback: slot.clone(),
        };
        let (host, events) = Host::new(HighScores::load());
        let config = EngineConfig::with_seed(js_sys::Date::now() as u64);

        let engine: GameEngine = Engine::with_config(config, surface, events, scheduler)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let engine = Rc::new(RefCell::new(engine));
        let host = Rc::new(RefCell::new(host));

        // Per-frame tick
        {
            let engine = engine.clone();
            let host = host.clone();
            let document = document.clone();
            *slot.borrow_mut() = Some(Closure::new(move |_time: f64| {
                {
                    let mut engine = engine.borrow_mut();
                    if let Some(handle) = engine.pending_frame() {
                        engine.on_frame(handle);
                    }
                }
                let mut host = host.borrow_mut();
                if host.sync(js_sys::Date::now()) {
                    update_hud(&document, &host);
                }
            }));
        }

        // Keyboard
        {
            let engine = engine.clone();
            let host = host.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(input) = HostInput::from_key_code(&event.code()) else {
                    return;
                };
                event.prevent_default();
                let mut host = host.borrow_mut();
                host.handle_input(input, &mut *engine.borrow_mut(), js_sys::Date::now());
                update_hud(&document, &host);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click / tap on the field
        {
            let engine = engine.clone();
            let host = host.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut host = host.borrow_mut();
                host.handle_input(HostInput::Pointer, &mut *engine.borrow_mut(), js_sys::Date::now());
                update_hud(&document, &host);
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // First frame under the menu overlay
        engine.borrow_mut().render();
        update_hud(&document, &host.borrow());
        log::info!("RunnerX ready");

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session length (two minutes of frames at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_TICKS: usize = 2 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| now_ms() as u64);
    log::info!("RunnerX (native, headless) starting with seed {seed}");

    if let Err(e) = run_headless(seed) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64) -> Result<(), runnerx::EngineError> {
    use runnerx::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use runnerx::host::{Autopilot, HostInput, HostView};
    use runnerx::renderer::MeshSurface;
    use runnerx::{Engine, EngineConfig, HighScores, Host, ManualScheduler};

    let (mut host, events) = Host::new(HighScores::load());
    let mut engine = Engine::with_config(
        EngineConfig::with_seed(seed),
        MeshSurface::new(FIELD_WIDTH, FIELD_HEIGHT),
        events,
        ManualScheduler::new(),
    )?;
    let pilot = Autopilot::default();

    host.handle_input(HostInput::Action, &mut engine, now_ms());

    let ticks = pilot.play(&mut host, &mut engine, DEMO_TICKS, now_ms);
    log::info!(
        "{} obstacles on the field, {} triangles in the last frame",
        engine.state().obstacles.len(),
        engine.surface().triangle_count()
    );

    match host.view() {
        HostView::GameOver {
            final_score,
            new_record,
        } => {
            println!("Game over after {ticks} ticks: score {final_score}");
            if new_record {
                println!("New high score!");
            }
        }
        _ => {
            engine.stop();
            println!("Survived {ticks} ticks: score {}", host.score());
        }
    }

    Ok(())
}
