//! Frame painter
//!
//! `render` reads the simulation and paints one frame. It never touches
//! simulation state, so a frame always shows the tick that just finished.

use glam::Vec2;

use super::surface::{Color, Surface};
use crate::config::EngineConfig;
use crate::sim::{GameState, Obstacle, ObstacleKind, Player};

/// Palette
pub mod palette {
    use super::Color;

    pub const SKY: Color = Color::rgb(0x87, 0xCE, 0xEB);
    pub const GROUND: Color = Color::rgb(0x8B, 0x45, 0x13);
    pub const GROUND_PATTERN: Color = Color::rgb(0x65, 0x43, 0x21);

    pub const EYE_BODY: Color = Color::rgb(0x4F, 0x46, 0xE5);
    pub const EYE_RIM: Color = Color::rgb(0x31, 0x2E, 0x81);
    pub const PUPIL: Color = Color::rgb(0x1F, 0x29, 0x37);
    pub const IRIS: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const HIGHLIGHT: Color = Color::rgb(0xE5, 0xE7, 0xEB);

    pub const GROUND_HAZARD: Color = Color::rgb(0x22, 0x8B, 0x22);
    pub const GROUND_HAZARD_STRIPE: Color = Color::rgb(0x32, 0xCD, 0x32);
    pub const ELEVATED_HAZARD: Color = Color::rgb(0x8B, 0x45, 0x13);
    pub const ELEVATED_HAZARD_WING: Color = Color::rgb(0xA0, 0x52, 0x2D);

    pub const CLOUD: Color = Color::WHITE.with_alpha(0.8);
}

/// Clouds: (base x, drift per tick, y)
const CLOUDS: [(f64, f64, f32); 3] = [(100.0, 0.1, 30.0), (300.0, 0.05, 50.0), (600.0, 0.08, 25.0)];
/// Cloud drift wraps after this many pixels
const CLOUD_PERIOD: f64 = 900.0;
/// Depth of the ground chevrons
const CHEVRON_DEPTH: f32 = 10.0;

/// Paint the whole frame
pub fn render<S: Surface + ?Sized>(state: &GameState, config: &EngineConfig, surface: &mut S) {
    surface.begin_frame();

    surface.fill_rect(Vec2::ZERO, state.field, palette::SKY);
    draw_ground(state, config, surface);
    draw_player(&state.player, surface);
    for obstacle in &state.obstacles {
        draw_obstacle(obstacle, surface);
    }
    draw_clouds(state.run.ticks, state.field.x, surface);
}

fn draw_ground<S: Surface + ?Sized>(state: &GameState, config: &EngineConfig, surface: &mut S) {
    let ground_y = state.ground_y;
    let width = state.field.x;
    let tile = config.ground_tile;

    surface.fill_rect(
        Vec2::new(0.0, ground_y),
        Vec2::new(width, config.ground_offset),
        palette::GROUND,
    );

    // Chevrons anchored to the scroll offset
    let mut x = state.scroll.offset;
    while x < width + tile {
        let left = Vec2::new(x, ground_y);
        let dip = Vec2::new(x + tile / 2.0, ground_y + CHEVRON_DEPTH);
        let right = Vec2::new(x + tile, ground_y);
        surface.stroke_line(left, dip, palette::GROUND_PATTERN, 2.0);
        surface.stroke_line(dip, right, palette::GROUND_PATTERN, 2.0);
        x += tile;
    }
}

fn draw_player<S: Surface + ?Sized>(player: &Player, surface: &mut S) {
    let center = player.center();
    let radii = Vec2::new(player.size.x / 2.0 - 2.0, player.size.y / 2.0 - 5.0);

    surface.fill_ellipse(center, radii, palette::EYE_BODY);
    surface.stroke_ellipse(center, radii, palette::EYE_RIM, 2.0);
    surface.fill_circle(center, 8.0, palette::PUPIL);
    surface.fill_circle(center, 4.0, palette::IRIS);
    surface.fill_circle(center + Vec2::new(1.0, -1.0), 1.5, palette::HIGHLIGHT);
}

fn draw_obstacle<S: Surface + ?Sized>(obstacle: &Obstacle, surface: &mut S) {
    let (pos, size) = (obstacle.pos, obstacle.size);

    match obstacle.kind {
        ObstacleKind::Ground => {
            surface.fill_rect(pos, size, palette::GROUND_HAZARD);
            let stripe = Vec2::new(size.x - 4.0, 5.0);
            for dy in [5.0, 15.0, 25.0] {
                surface.fill_rect(pos + Vec2::new(2.0, dy), stripe, palette::GROUND_HAZARD_STRIPE);
            }
        }
        ObstacleKind::Elevated => {
            surface.fill_rect(pos, size, palette::ELEVATED_HAZARD);
            surface.fill_rect(
                pos + Vec2::new(5.0, 3.0),
                size - Vec2::new(10.0, 6.0),
                palette::ELEVATED_HAZARD_WING,
            );
        }
    }
}

/// Cloud x positions for a tick
pub fn cloud_positions(ticks: u64) -> [Vec2; 3] {
    CLOUDS.map(|(base, drift, y)| {
        let travelled = (ticks as f64 * drift) % CLOUD_PERIOD;
        Vec2::new((base - travelled) as f32, y)
    })
}

fn draw_clouds<S: Surface + ?Sized>(ticks: u64, width: f32, surface: &mut S) {
    for cloud in cloud_positions(ticks) {
        if cloud.x > -100.0 && cloud.x < width + 50.0 {
            surface.fill_circle(cloud, 15.0, palette::CLOUD);
            surface.fill_circle(cloud + Vec2::new(15.0, 0.0), 20.0, palette::CLOUD);
            surface.fill_circle(cloud + Vec2::new(30.0, 0.0), 15.0, palette::CLOUD);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::sim::GamePhase;

    fn scene() -> (GameState, EngineConfig) {
        let config = EngineConfig::default();
        let mut state = GameState::new(&config, Vec2::new(800.0, 200.0));
        state.phase = GamePhase::Running;
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Ground, 400.0, state.ground_y));
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Elevated, 700.0, state.ground_y));
        (state, config)
    }

    #[test]
    fn test_frame_starts_with_sky() {
        let (state, config) = scene();
        let mut surface = DrawList::new(800.0, 200.0);
        render(&state, &config, &mut surface);
        assert_eq!(
            surface.commands()[0],
            DrawCommand::Rect {
                min: Vec2::ZERO,
                size: Vec2::new(800.0, 200.0),
                color: palette::SKY,
            }
        );
    }

    #[test]
    fn test_each_obstacle_drawn_by_kind() {
        let (state, config) = scene();
        let mut surface = DrawList::new(800.0, 200.0);
        render(&state, &config, &mut surface);

        let bodies: Vec<_> = surface.rects_with(palette::GROUND_HAZARD).collect();
        assert_eq!(bodies, vec![(Vec2::new(400.0, 140.0), Vec2::new(20.0, 40.0))]);
        assert_eq!(surface.rects_with(palette::GROUND_HAZARD_STRIPE).count(), 3);
        assert_eq!(surface.rects_with(palette::ELEVATED_HAZARD_WING).count(), 1);
    }

    #[test]
    fn test_render_leaves_state_untouched() {
        let (state, config) = scene();
        let before = format!("{state:?}");
        let mut surface = DrawList::new(800.0, 200.0);
        render(&state, &config, &mut surface);
        render(&state, &config, &mut surface);
        assert_eq!(format!("{state:?}"), before);
        assert_eq!(surface.frames(), 2);
    }

    #[test]
    fn test_chevrons_follow_scroll() {
        let (mut state, config) = scene();
        state.scroll.offset = -20.0;
        let mut surface = DrawList::new(800.0, 200.0);
        render(&state, &config, &mut surface);
        let first_line = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Line { from, .. } => Some(*from),
            _ => None,
        });
        assert_eq!(first_line, Some(Vec2::new(-20.0, 180.0)));
    }

    #[test]
    fn test_clouds_drift_with_ticks() {
        assert_eq!(cloud_positions(0)[0], Vec2::new(100.0, 30.0));
        assert!((cloud_positions(100)[0].x - 90.0).abs() < 1e-3);
        // Wraps after the period
        assert!((cloud_positions(9000)[0].x - 100.0).abs() < 1e-3);
    }

    fn eye_layers(surface: &DrawList) -> Vec<DrawCommand> {
        let eye = [
            palette::EYE_BODY,
            palette::EYE_RIM,
            palette::PUPIL,
            palette::IRIS,
            palette::HIGHLIGHT,
        ];
        surface
            .commands()
            .iter()
            .filter(|cmd| match cmd {
                DrawCommand::Ellipse { color, .. } | DrawCommand::EllipseOutline { color, .. } => {
                    eye.contains(color)
                }
                _ => false,
            })
            .cloned()
            .collect()
    }

    fn expected_eye(center: Vec2) -> Vec<DrawCommand> {
        vec![
            DrawCommand::Ellipse {
                center,
                radii: Vec2::new(18.0, 15.0),
                color: palette::EYE_BODY,
            },
            DrawCommand::EllipseOutline {
                center,
                radii: Vec2::new(18.0, 15.0),
                color: palette::EYE_RIM,
                line_width: 2.0,
            },
            DrawCommand::Ellipse {
                center,
                radii: Vec2::splat(8.0),
                color: palette::PUPIL,
            },
            DrawCommand::Ellipse {
                center,
                radii: Vec2::splat(4.0),
                color: palette::IRIS,
            },
            DrawCommand::Ellipse {
                center: center + Vec2::new(1.0, -1.0),
                radii: Vec2::splat(1.5),
                color: palette::HIGHLIGHT,
            },
        ]
    }

    #[test]
    fn test_eye_layers_follow_player() {
        let (mut state, config) = scene();
        let mut surface = DrawList::new(800.0, 200.0);

        render(&state, &config, &mut surface);
        assert_eq!(eye_layers(&surface), expected_eye(Vec2::new(70.0, 160.0)));

        // Mid-jump
        state.player.pos.y -= 50.0;
        render(&state, &config, &mut surface);
        assert_eq!(eye_layers(&surface), expected_eye(Vec2::new(70.0, 110.0)));
    }
}
