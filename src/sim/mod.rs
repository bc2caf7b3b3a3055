//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no delta time
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit, player_hitbox};
pub use spawn::Spawn;
pub use state::{GamePhase, GameState, Obstacle, ObstacleKind, Player, RunState, WorldScroll};
pub use tick::{TickOutcome, tick};
