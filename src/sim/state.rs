//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; the engine is its only
//! owner.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::EngineConfig;
use crate::consts::*;

/// Authoritative run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh state, never started since construction or reset
    Ready,
    /// Ticking once per frame
    Running,
    /// Stopped by the host mid-run; `start()` resumes
    Stopped,
    /// Run ended on a collision; only `reset()` leaves this phase
    GameOver,
}

impl GamePhase {
    pub fn is_running(self) -> bool {
        self == GamePhase::Running
    }
}

/// The player entity (the eye)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub airborne: bool,
    pub jump_power: f32,
    pub gravity: f32,
    /// Resting y (top edge when standing on the ground)
    pub rest_y: f32,
}

impl Player {
    pub fn new(config: &EngineConfig, ground_y: f32) -> Self {
        let rest_y = ground_y - config.player_size;
        Self {
            pos: Vec2::new(config.player_x, rest_y),
            size: Vec2::splat(config.player_size),
            velocity_y: 0.0,
            airborne: false,
            jump_power: config.jump_power,
            gravity: config.gravity,
            rest_y,
        }
    }

    /// Full sprite box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// True when standing still on the ground
    pub fn is_resting(&self) -> bool {
        !self.airborne && self.velocity_y == 0.0 && self.pos.y == self.rest_y
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground; must be jumped
    Ground,
    /// Floats above a standing player; jumping into it is fatal
    Elevated,
}

impl ObstacleKind {
    /// Width and height of this kind
    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::Ground => Vec2::new(GROUND_HAZARD_WIDTH, GROUND_HAZARD_HEIGHT),
            ObstacleKind::Elevated => Vec2::new(ELEVATED_HAZARD_WIDTH, ELEVATED_HAZARD_HEIGHT),
        }
    }

    /// Top edge for a given ground line
    pub fn top(self, ground_y: f32) -> f32 {
        match self {
            ObstacleKind::Ground => ground_y - GROUND_HAZARD_LIFT,
            ObstacleKind::Elevated => ground_y - ELEVATED_HAZARD_LIFT,
        }
    }
}

/// A hazard scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner; only x changes after spawn
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Obstacle of the given kind with its left edge at `x`
    pub fn new(kind: ObstacleKind, x: f32, ground_y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, kind.top(ground_y)),
            size: kind.size(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully scrolled past the left edge
    pub fn is_retired(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Cosmetic ground scroll
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WorldScroll {
    pub offset: f32,
}

impl WorldScroll {
    /// Scroll by `speed`, wrapping at one tile
    pub fn advance(&mut self, speed: f32, tile: f32) {
        self.offset -= speed;
        if self.offset <= -tile {
            self.offset = 0.0;
        }
    }
}

/// Score and difficulty
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunState {
    /// Internal tick counter; drives score, speed ramp and clouds
    pub ticks: u64,
    pub speed: f32,
}

impl RunState {
    pub fn new(initial_speed: f32) -> Self {
        Self {
            ticks: 0,
            speed: initial_speed,
        }
    }

    /// Displayed score
    pub fn score(&self, divisor: u64) -> u32 {
        (self.ticks / divisor) as u32
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Play-field size (surface width, height)
    pub field: Vec2,
    /// Ground line y
    pub ground_y: f32,
    pub player: Player,
    /// Ordered by spawn time, so the last one is rightmost
    pub obstacles: Vec<Obstacle>,
    pub run: RunState,
    pub scroll: WorldScroll,
    pub phase: GamePhase,
    /// Obstacle RNG
    pub rng: Pcg32,
}

impl GameState {
    /// Fresh state for a field of the given size (config must already be validated)
    pub fn new(config: &EngineConfig, field: Vec2) -> Self {
        let ground_y = field.y - config.ground_offset;
        Self {
            field,
            ground_y,
            player: Player::new(config, ground_y),
            obstacles: Vec::new(),
            run: RunState::new(config.initial_speed),
            scroll: WorldScroll::default(),
            phase: GamePhase::Ready,
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    /// Restore construction-time defaults
    pub fn reset(&mut self, config: &EngineConfig) {
        *self = Self::new(config, self.field);
    }

    pub fn score(&self, config: &EngineConfig) -> u32 {
        self.run.score(config.score_divisor)
    }

    /// Most recently spawned obstacle
    pub fn newest_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }
}
