//! Fixed-step simulation tick
//!
//! Order within a tick: scoring and speed ramp, player physics, ground
//! scroll, spawning, obstacle advance/retire, collision. Collision always
//! sees this tick's final positions.

use super::collision::{first_hit, player_hitbox};
use super::physics;
use super::spawn::{Spawn, advance_obstacles, maybe_spawn};
use super::state::{GamePhase, GameState};
use crate::config::EngineConfig;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Displayed score after this tick
    pub score: u32,
    /// Speed went up this tick
    pub speed_ramped: bool,
    pub landed: bool,
    pub spawned: Option<Spawn>,
    pub retired: usize,
    /// Index of the obstacle that ended the run
    pub collision: Option<usize>,
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        self.collision.is_some()
    }
}

/// Advance the simulation by one tick. Does nothing unless running.
pub fn tick(state: &mut GameState, config: &EngineConfig) -> Option<TickOutcome> {
    if !state.phase.is_running() {
        return None;
    }

    // The ramp keys off raw ticks, not the displayed score
    state.run.ticks += 1;
    let speed_ramped = state.run.ticks % config.speed_step_interval == 0;
    if speed_ramped {
        state.run.speed += config.speed_step;
        log::debug!(
            "speed ramp at tick {}: {:.1}",
            state.run.ticks,
            state.run.speed
        );
    }
    let score = state.score(config);

    let landed = physics::step(&mut state.player);

    let speed = state.run.speed;
    state.scroll.advance(speed, config.ground_tile);
    let spawned = maybe_spawn(state, config);
    let retired = advance_obstacles(&mut state.obstacles, speed);

    let hitbox = player_hitbox(&state.player, config.hitbox_inset);
    let collision = first_hit(&hitbox, &state.obstacles);
    if collision.is_some() {
        state.phase = GamePhase::GameOver;
    }

    Some(TickOutcome {
        score,
        speed_ramped,
        landed,
        spawned,
        retired,
        collision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running(config: &EngineConfig) -> GameState {
        let mut state = GameState::new(config, Vec2::new(800.0, 200.0));
        state.phase = GamePhase::Running;
        state
    }

    fn quiet() -> EngineConfig {
        EngineConfig {
            spawn_obstacles: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_requires_running() {
        let config = EngineConfig::default();
        let mut state = GameState::new(&config, Vec2::new(800.0, 200.0));
        assert!(tick(&mut state, &config).is_none());
        assert_eq!(state.run.ticks, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_first_tick_spawns_and_moves() {
        let config = EngineConfig::default();
        let mut state = running(&config);
        let outcome = tick(&mut state, &config).unwrap();
        assert!(outcome.spawned.is_some());
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at the edge, then advanced in the same tick
        assert_eq!(state.obstacles[0].pos.x, 800.0 - 6.0);
        assert_eq!(state.scroll.offset, -6.0);
    }

    #[test]
    fn test_speed_ramps_on_raw_ticks() {
        let config = quiet();
        let mut state = running(&config);
        for n in 1..=250u64 {
            let outcome = tick(&mut state, &config).unwrap();
            assert_eq!(outcome.speed_ramped, n % 100 == 0);
        }
        assert_eq!(state.run.speed, 6.0 + 2.0 * 0.5);
        assert_eq!(state.score(&config), 25);
    }

    #[test]
    fn test_collision_is_checked_after_movement() {
        let config = quiet();
        let mut state = running(&config);
        // Lands exactly on the hitbox's right edge after moving 6
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Ground, 91.0, state.ground_y));
        let outcome = tick(&mut state, &config).unwrap();
        assert!(!outcome.is_game_over());

        // Next tick it is 6 units inside
        let outcome = tick(&mut state, &config).unwrap();
        assert_eq!(outcome.collision, Some(0));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(tick(&mut state, &config).is_none());
    }

    #[test]
    fn test_jumping_clears_ground_hazard() {
        let config = quiet();
        let mut state = running(&config);
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Ground, 150.0, state.ground_y));
        physics::jump(&mut state.player);
        for _ in 0..60 {
            let outcome = tick(&mut state, &config).unwrap();
            assert!(!outcome.is_game_over());
        }
        assert!(state.obstacles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_spawn_gaps_stay_in_range(seed in any::<u64>()) {
            let config = EngineConfig {
                seed,
                ..Default::default()
            };
            let mut state = running(&config);
            for _ in 0..600 {
                // Keep the run alive so spawning carries on
                state.obstacles.iter_mut().for_each(|o| o.pos.y = -1000.0);
                let Some(outcome) = tick(&mut state, &config) else { break };
                if let Some(Spawn { gap: Some(gap), .. }) = outcome.spawned {
                    prop_assert!(gap >= config.min_obstacle_distance);
                    prop_assert!(gap <= config.max_obstacle_distance + state.run.speed);
                }
                prop_assert!(state.obstacles.iter().all(|o| !o.is_retired()));
                prop_assert!(state.obstacles.windows(2).all(|w| w[0].pos.x < w[1].pos.x));
            }
        }

        #[test]
        fn prop_score_is_ticks_over_ten(n in 0u64..3000) {
            let config = quiet();
            let mut state = running(&config);
            let mut last = 0;
            for _ in 0..n {
                let outcome = tick(&mut state, &config).unwrap();
                prop_assert!(outcome.score >= last);
                last = outcome.score;
            }
            prop_assert_eq!(state.score(&config) as u64, n / 10);
        }
    }
}
