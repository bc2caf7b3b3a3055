//! 2D drawing surface abstraction
//!
//! The painter only needs filled rectangles, ellipses and stroked lines.
//! Coordinates are in surface pixels with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Linear RGBA color, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// From 8-bit channels (like a CSS hex color)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba()` string for canvas-style backends
    pub fn to_css(self) -> String {
        let channel = |c: f32| (c * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a
        )
    }
}

/// A fixed-size 2D drawing target
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Called once before a frame is painted
    fn begin_frame(&mut self) {}

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, line_width: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_ellipse(center, Vec2::splat(radius), color);
    }
}

impl<T: Surface + ?Sized> Surface for &mut T {
    fn width(&self) -> f32 {
        (**self).width()
    }

    fn height(&self) -> f32 {
        (**self).height()
    }

    fn begin_frame(&mut self) {
        (**self).begin_frame()
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        (**self).fill_rect(min, size, color)
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        (**self).fill_ellipse(center, radii, color)
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, line_width: f32) {
        (**self).stroke_ellipse(center, radii, color, line_width)
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32) {
        (**self).stroke_line(from, to, color, line_width)
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        (**self).fill_circle(center, radius, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(Color::rgb(0x87, 0xCE, 0xEB).to_css(), "rgba(135, 206, 235, 1)");
        assert_eq!(Color::WHITE.with_alpha(0.8).to_css(), "rgba(255, 255, 255, 0.8)");
    }
}
