//! RunnerX - a side-scrolling eye runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `engine`: Owns the simulation and drives update/render once per frame
//! - `driver`: Display-refresh scheduling abstraction
//! - `renderer`: 2D surface abstraction and the frame painter
//! - `host`: Host-side view state, input mapping and high score bookkeeping

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod events;
pub mod highscores;
pub mod host;
pub mod renderer;
pub mod sim;

pub use config::EngineConfig;
pub use driver::{FrameHandle, FrameScheduler, ManualScheduler};
pub use engine::{Engine, JumpHandle};
pub use error::EngineError;
pub use events::{Callbacks, EngineObserver, EventLog, GameEvent};
pub use highscores::HighScores;
pub use host::{Host, HostView};

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions used by the browser host
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 200.0;

    /// Ground line sits this far above the bottom edge
    pub const GROUND_OFFSET: f32 = 20.0;
    /// Ground texture period (pixels)
    pub const GROUND_TILE: f32 = 50.0;

    /// Player (the eye)
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const JUMP_POWER: f32 = 15.0;
    pub const GRAVITY: f32 = 0.8;
    /// Collision leniency on every side of the player sprite
    pub const HITBOX_INSET: f32 = 5.0;

    /// World speed (pixels per tick)
    pub const INITIAL_SPEED: f32 = 6.0;
    pub const SPEED_STEP: f32 = 0.5;
    /// Speed ramps whenever the raw tick counter hits a multiple of this
    pub const SPEED_STEP_INTERVAL: u64 = 100;
    /// Displayed score = ticks / SCORE_DIVISOR
    pub const SCORE_DIVISOR: u64 = 10;

    /// Spawn gap bounds, measured from the right edge to the newest obstacle
    pub const MIN_OBSTACLE_DISTANCE: f32 = 200.0;
    pub const MAX_OBSTACLE_DISTANCE: f32 = 400.0;
    /// Probability of an elevated hazard per spawn
    pub const ELEVATED_CHANCE: f64 = 0.3;

    /// Ground hazard geometry (width, height, lift above ground)
    pub const GROUND_HAZARD_WIDTH: f32 = 20.0;
    pub const GROUND_HAZARD_HEIGHT: f32 = 40.0;
    pub const GROUND_HAZARD_LIFT: f32 = 40.0;

    /// Elevated hazard geometry (width, height, lift above ground)
    pub const ELEVATED_HAZARD_WIDTH: f32 = 30.0;
    pub const ELEVATED_HAZARD_HEIGHT: f32 = 20.0;
    pub const ELEVATED_HAZARD_LIFT: f32 = 80.0;

    /// Default RNG seed for reproducible runs
    pub const DEFAULT_SEED: u64 = 0x00E7_E5EE_D000;
}
