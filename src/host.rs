//! Host-side glue
//!
//! The host never infers what the engine is doing. Its view changes only
//! through the events the engine sends and the start/reset calls the host
//! makes itself. High score bookkeeping reacts to the game-over event and
//! stays out of the engine.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::driver::{FrameScheduler, ManualScheduler};
use crate::engine::Engine;
use crate::events::{EngineObserver, GameEvent};
use crate::highscores::{HighScores, format_score};
use crate::renderer::Surface;
use crate::sim::{GameState, ObstacleKind};

/// What the host is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostView {
    /// Title overlay before the first start
    Menu,
    Playing,
    /// Result overlay
    GameOver { final_score: u32, new_record: bool },
}

/// Player input as the host sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    /// Space or ArrowUp
    Action,
    /// Click or tap on the play field
    Pointer,
}

impl HostInput {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" | "ArrowUp" => Some(HostInput::Action),
            _ => None,
        }
    }
}

pub struct Host {
    view: HostView,
    score: u32,
    high_scores: HighScores,
    events: Receiver<GameEvent>,
}

impl Host {
    /// Host plus the sender to hand the engine as its observer
    pub fn new(high_scores: HighScores) -> (Self, Sender<GameEvent>) {
        let (tx, rx) = mpsc::channel();
        let host = Self {
            view: HostView::Menu,
            score: 0,
            high_scores,
            events: rx,
        };
        (host, tx)
    }

    pub fn view(&self) -> HostView {
        self.view
    }

    /// Last displayed score
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Drain engine events. `now` timestamps a finished run (ms since epoch).
    /// Returns whether anything arrived.
    pub fn sync(&mut self, now: f64) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event, now);
            changed = true;
        }
        changed
    }

    fn apply(&mut self, event: GameEvent, now: f64) {
        match event {
            GameEvent::ScoreChanged(score) => self.score = score,
            GameEvent::GameOver(final_score) => {
                self.score = final_score;
                let new_record = self.high_scores.is_new_record(final_score);
                if let Some(rank) = self.high_scores.add_score(final_score, now) {
                    log::info!("run scored {final_score}, rank {rank}");
                    self.high_scores.save();
                }
                self.view = HostView::GameOver {
                    final_score,
                    new_record,
                };
            }
        }
    }

    /// Route one input: jump while playing, otherwise (re)start a run
    pub fn handle_input<S, O, F>(&mut self, input: HostInput, engine: &mut Engine<S, O, F>, now: f64)
    where
        S: Surface,
        O: EngineObserver,
        F: FrameScheduler,
    {
        self.sync(now);
        match (self.view, input) {
            (HostView::Playing, _) => engine.jump(),
            (HostView::Menu, _) => {
                engine.start();
                self.view = HostView::Playing;
            }
            (HostView::GameOver { .. }, _) => {
                engine.reset();
                engine.start();
                self.sync(now);
                self.view = HostView::Playing;
            }
        }
    }

    /// Abandon the current run and show the title again
    pub fn back_to_menu<S, O, F>(&mut self, engine: &mut Engine<S, O, F>, now: f64)
    where
        S: Surface,
        O: EngineObserver,
        F: FrameScheduler,
    {
        engine.reset();
        self.sync(now);
        self.view = HostView::Menu;
    }

    /// HUD readout, e.g. `Score: 00042  High: 00100`
    pub fn score_line(&self) -> String {
        format!(
            "Score: {}  High: {}",
            format_score(self.score),
            format_score(self.high_score())
        )
    }
}

/// Jumps ground hazards on its own. Used for headless demo runs.
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Jump when a ground hazard is this many ticks of travel away
    pub lookahead_ticks: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead_ticks: 10.0,
        }
    }
}

impl Autopilot {
    pub fn should_jump(&self, state: &GameState) -> bool {
        let player = &state.player;
        if player.airborne {
            return false;
        }
        let front = player.pos.x + player.size.x;
        let reach = state.run.speed * self.lookahead_ticks;

        // Elevated hazards pass over a standing player
        state
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Ground && o.right() > player.pos.x)
            .any(|o| o.pos.x - front <= reach)
    }

    /// Play the current run on a headless engine until it ends or
    /// `max_ticks` frames ran. Only acts while the host shows a live run,
    /// so a finished run is never restarted. Returns the ticks played.
    pub fn play<S, O>(
        &self,
        host: &mut Host,
        engine: &mut Engine<S, O, ManualScheduler>,
        max_ticks: usize,
        mut now: impl FnMut() -> f64,
    ) -> usize
    where
        S: Surface,
        O: EngineObserver,
    {
        let mut ticks = 0;
        while ticks < max_ticks && host.view() == HostView::Playing {
            if self.should_jump(engine.state()) {
                host.handle_input(HostInput::Action, engine, now());
            }
            let Some(handle) = engine.scheduler_mut().next_due() else {
                break;
            };
            if engine.on_frame(handle) {
                ticks += 1;
            }
            host.sync(now());

            if ticks % 600 == 0 {
                log::info!("{} | speed {:.1}", host.score_line(), engine.speed());
            }
        }
        ticks
    }
}
