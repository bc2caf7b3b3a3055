//! Engine tuning
//!
//! Every constant the simulation reads lives here so a host can tweak a run
//! (or a test can suppress spawning) without touching the engine. Defaults
//! reproduce the stock game.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EngineError;

/// Simulation tuning, serializable as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed horizontal position of the player
    pub player_x: f32,
    /// Player sprite is a square of this size
    pub player_size: f32,
    /// Upward velocity applied by a jump (pixels per tick)
    pub jump_power: f32,
    /// Downward acceleration (pixels per tick²)
    pub gravity: f32,
    /// Leniency margin removed from every side of the player for collisions
    pub hitbox_inset: f32,

    /// Ground line distance from the bottom of the surface
    pub ground_offset: f32,
    /// Period of the scrolling ground pattern
    pub ground_tile: f32,

    pub initial_speed: f32,
    pub speed_step: f32,
    /// Raw tick multiple at which speed ramps
    pub speed_step_interval: u64,
    /// Raw ticks per displayed point
    pub score_divisor: u64,

    pub min_obstacle_distance: f32,
    pub max_obstacle_distance: f32,
    /// Chance that a spawn is an elevated hazard
    pub elevated_chance: f64,
    /// When false the generator never spawns (harnesses inject obstacles)
    pub spawn_obstacles: bool,

    /// Seed for the obstacle RNG
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            jump_power: JUMP_POWER,
            gravity: GRAVITY,
            hitbox_inset: HITBOX_INSET,

            ground_offset: GROUND_OFFSET,
            ground_tile: GROUND_TILE,

            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            speed_step_interval: SPEED_STEP_INTERVAL,
            score_divisor: SCORE_DIVISOR,

            min_obstacle_distance: MIN_OBSTACLE_DISTANCE,
            max_obstacle_distance: MAX_OBSTACLE_DISTANCE,
            elevated_chance: ELEVATED_CHANCE,
            spawn_obstacles: true,

            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    /// Default tuning with a specific RNG seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the tuning against a surface of the given size
    pub fn validate(&self, width: f32, height: f32) -> Result<(), EngineError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EngineError::InvalidSurface { width, height });
        }

        let invalid = |msg: String| Err(EngineError::InvalidConfig(msg));

        let lengths = [
            ("player_x", self.player_x),
            ("player_size", self.player_size),
            ("jump_power", self.jump_power),
            ("gravity", self.gravity),
            ("hitbox_inset", self.hitbox_inset),
            ("ground_offset", self.ground_offset),
            ("ground_tile", self.ground_tile),
            ("initial_speed", self.initial_speed),
            ("speed_step", self.speed_step),
            ("min_obstacle_distance", self.min_obstacle_distance),
            ("max_obstacle_distance", self.max_obstacle_distance),
        ];
        if let Some((name, value)) = lengths.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }

        if self.ground_offset < 0.0 || self.ground_offset >= height {
            return invalid(format!(
                "ground offset {} must lie within surface height {}",
                self.ground_offset, height
            ));
        }
        if self.player_size <= 2.0 * self.hitbox_inset || self.hitbox_inset < 0.0 {
            return invalid(format!(
                "hitbox inset {} leaves no hitbox on a {} player",
                self.hitbox_inset, self.player_size
            ));
        }
        if height - self.ground_offset < self.player_size {
            return invalid(format!(
                "player of size {} does not fit above the ground",
                self.player_size
            ));
        }
        if self.gravity <= 0.0 || self.jump_power < 0.0 {
            return invalid("gravity must be positive and jump power non-negative".into());
        }
        if self.initial_speed <= 0.0 || self.speed_step < 0.0 {
            return invalid("speed must start positive and never decrease".into());
        }
        if self.speed_step_interval == 0 || self.score_divisor == 0 {
            return invalid("speed step interval and score divisor must be non-zero".into());
        }
        if self.min_obstacle_distance < 0.0
            || self.min_obstacle_distance > self.max_obstacle_distance
        {
            return invalid(format!(
                "obstacle distance range [{}, {}] is empty",
                self.min_obstacle_distance, self.max_obstacle_distance
            ));
        }
        if !(0.0..=1.0).contains(&self.elevated_chance) {
            return invalid(format!(
                "elevated chance {} is not a probability",
                self.elevated_chance
            ));
        }
        if self.ground_tile <= 0.0 {
            return invalid("ground tile must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate_on_stock_field() {
        let config = EngineConfig::default();
        assert!(config.validate(FIELD_WIDTH, FIELD_HEIGHT).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_surface() {
        let config = EngineConfig::default();
        assert!(matches!(
            config.validate(0.0, 200.0),
            Err(EngineError::InvalidSurface { .. })
        ));
        assert!(matches!(
            config.validate(800.0, -1.0),
            Err(EngineError::InvalidSurface { .. })
        ));
        assert!(matches!(
            config.validate(f32::NAN, 200.0),
            Err(EngineError::InvalidSurface { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_distance_range() {
        let config = EngineConfig {
            min_obstacle_distance: 500.0,
            max_obstacle_distance: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(FIELD_WIDTH, FIELD_HEIGHT),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_surface_too_short_for_player() {
        let config = EngineConfig::default();
        assert!(config.validate(800.0, 50.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite_lengths() {
        let breakers: [fn(&mut EngineConfig); 11] = [
            |c| c.player_x = f32::NAN,
            |c| c.player_size = f32::NAN,
            |c| c.jump_power = f32::NAN,
            |c| c.gravity = f32::NAN,
            |c| c.hitbox_inset = f32::NAN,
            |c| c.ground_offset = f32::NAN,
            |c| c.ground_tile = f32::INFINITY,
            |c| c.initial_speed = f32::NAN,
            |c| c.speed_step = f32::NAN,
            |c| c.min_obstacle_distance = f32::NAN,
            |c| c.max_obstacle_distance = f32::INFINITY,
        ];
        for (i, breaker) in breakers.iter().enumerate() {
            let mut config = EngineConfig::default();
            breaker(&mut config);
            assert!(
                matches!(
                    config.validate(FIELD_WIDTH, FIELD_HEIGHT),
                    Err(EngineError::InvalidConfig(_))
                ),
                "field #{i} accepted a non-finite value"
            );
        }
    }

    #[test]
    fn test_rejects_nan_elevated_chance() {
        let config = EngineConfig {
            elevated_chance: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate(FIELD_WIDTH, FIELD_HEIGHT).is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "seed": 7, "spawn_obstacles": false }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert!(!config.spawn_obstacles);
        assert_eq!(config.initial_speed, INITIAL_SPEED);
        assert_eq!(config.score_divisor, SCORE_DIVISOR);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            EngineConfig::from_json("{ seed: "),
            Err(EngineError::ConfigParse(_))
        ));
    }
}
