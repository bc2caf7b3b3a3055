//! The engine
//!
//! Owns the simulation, the drawing surface, the observer and the frame
//! scheduler. Each scheduled frame runs exactly one `update()` followed by one
//! `render()`; the next frame is only requested after both finish, so ticks
//! never overlap. `stop()` withdraws the outstanding request and is also
//! checked at the top of every frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::Vec2;

use crate::config::EngineConfig;
use crate::driver::{FrameHandle, FrameScheduler, ManualScheduler};
use crate::error::EngineError;
use crate::events::EngineObserver;
use crate::renderer::{self, Surface};
use crate::sim::{GamePhase, GameState, Obstacle, TickOutcome, physics, tick};

/// Jump request that can be raised from any thread. The engine consumes it
/// at the top of the next update.
#[derive(Debug, Clone, Default)]
pub struct JumpHandle(Arc<AtomicBool>);

impl JumpHandle {
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

pub struct Engine<S, O, F> {
    config: EngineConfig,
    state: GameState,
    surface: S,
    observer: O,
    scheduler: F,
    /// Outstanding frame request, if any
    pending: Option<FrameHandle>,
    jump_latch: JumpHandle,
}

impl<S, O, F> Engine<S, O, F>
where
    S: Surface,
    O: EngineObserver,
    F: FrameScheduler,
{
    /// Engine with stock tuning
    pub fn new(surface: S, observer: O, scheduler: F) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default(), surface, observer, scheduler)
    }

    /// Fails fast when the surface or tuning cannot produce a sane field
    pub fn with_config(
        config: EngineConfig,
        surface: S,
        observer: O,
        scheduler: F,
    ) -> Result<Self, EngineError> {
        let (width, height) = (surface.width(), surface.height());
        config.validate(width, height)?;

        let state = GameState::new(&config, Vec2::new(width, height));
        log::info!(
            "engine ready: {}x{} field, ground at {}, seed {:#x}",
            width,
            height,
            state.ground_y,
            config.seed
        );

        Ok(Self {
            config,
            state,
            surface,
            observer,
            scheduler,
            pending: None,
            jump_latch: JumpHandle::default(),
        })
    }

    /// Begin (or resume) ticking. No-op while running, and after a game
    /// over until `reset()`.
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Running => return,
            GamePhase::GameOver => {
                log::warn!("start() after game over ignored; reset() first");
                return;
            }
            GamePhase::Ready | GamePhase::Stopped => {}
        }

        self.state.phase = GamePhase::Running;
        self.pending = Some(self.scheduler.request_frame());
        log::info!("run started at tick {}", self.state.run.ticks);
    }

    /// Stop ticking and withdraw the pending frame. Always valid.
    pub fn stop(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.state.phase = GamePhase::Stopped;
            log::info!("run stopped at tick {}", self.state.run.ticks);
        }
        self.cancel_pending();
    }

    /// Stop, restore construction-time state, and report a zero score
    pub fn reset(&mut self) {
        self.stop();
        self.state.reset(&self.config);
        self.jump_latch.take();
        self.observer.notify_score(0);
        log::info!("engine reset");
    }

    /// Jump if standing on the ground; ignored while airborne
    pub fn jump(&mut self) {
        physics::jump(&mut self.state.player);
    }

    /// Thread-safe jump trigger for input delivered off the tick thread
    pub fn jump_handle(&self) -> JumpHandle {
        self.jump_latch.clone()
    }

    /// Entry point for the host's refresh callback. Runs one update/render
    /// pair if `handle` is the outstanding request and the run is live.
    /// Returns whether a tick ran.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.state.phase.is_running() || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        self.update();
        self.render();

        if self.state.phase.is_running() {
            self.pending = Some(self.scheduler.request_frame());
        }
        true
    }

    fn update(&mut self) -> Option<TickOutcome> {
        if self.jump_latch.take() {
            physics::jump(&mut self.state.player);
        }

        let outcome = tick(&mut self.state, &self.config)?;
        self.observer.notify_score(outcome.score);

        if outcome.is_game_over() {
            self.cancel_pending();
            log::info!(
                "game over: score {} after {} ticks at speed {:.1}",
                outcome.score,
                self.state.run.ticks,
                self.state.run.speed
            );
            self.observer.notify_game_over(outcome.score);
        }
        Some(outcome)
    }

    /// Paint the current state
    pub fn render(&mut self) {
        renderer::render(&self.state, &self.config, &mut self.surface);
    }

    /// Place an obstacle directly (harnesses, scripted scenarios). It joins
    /// the field as the newest obstacle.
    pub fn inject_obstacle(&mut self, obstacle: Obstacle) {
        self.state.obstacles.push(obstacle);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase.is_running()
    }

    /// Displayed score
    pub fn score(&self) -> u32 {
        self.state.score(&self.config)
    }

    pub fn speed(&self) -> f32 {
        self.state.run.speed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<S, O> Engine<S, O, ManualScheduler>
where
    S: Surface,
    O: EngineObserver,
{
    /// Feed up to `max` due frames back into the engine. Returns the number
    /// of ticks that ran.
    pub fn run_frames(&mut self, max: usize) -> usize {
        let mut ticks = 0;
        while ticks < max {
            let Some(handle) = self.scheduler.next_due() else {
                break;
            };
            if self.on_frame(handle) {
                ticks += 1;
            }
        }
        ticks
    }
}
