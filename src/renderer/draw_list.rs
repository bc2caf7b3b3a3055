//! Recording surface
//!
//! Keeps the draw calls of the last painted frame. Useful for headless hosts
//! that forward commands elsewhere, and for inspecting what a frame drew.

use glam::Vec2;

use super::surface::{Color, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
    EllipseOutline {
        center: Vec2,
        radii: Vec2,
        color: Color,
        line_width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        line_width: f32,
    },
}

#[derive(Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Commands of the most recent frame
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Frames painted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rectangles drawn with exactly this color
    pub fn rects_with(&self, color: Color) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCommand::Rect { min, size, color: c } if *c == color => Some((*min, *size)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn width(&self) -> f32 {
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { min, size, color });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radii,
            color,
        });
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::EllipseOutline {
            center,
            radii,
            color,
            line_width,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            line_width,
        });
    }
}
