//! Triangle-mesh surface
//!
//! Tessellates each draw call into colored vertices in painter's order. A GPU
//! host uploads `as_bytes()` once per frame and draws it as a triangle list.

use glam::Vec2;

use super::shapes;
use super::surface::{Color, Surface};
use super::vertex::Vertex;

/// Segments per full ellipse
pub const DEFAULT_SEGMENTS: u32 = 32;

#[derive(Debug, Clone)]
pub struct MeshSurface {
    size: Vec2,
    segments: u32,
    vertices: Vec<Vertex>,
}

impl MeshSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_segments(width, height, DEFAULT_SEGMENTS)
    }

    pub fn with_segments(width: f32, height: f32, segments: u32) -> Self {
        Self {
            size: Vec2::new(width, height),
            segments: segments.max(3),
            vertices: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Packed vertex buffer contents
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Surface for MeshSurface {
    fn width(&self) -> f32 {
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
    }

    fn begin_frame(&mut self) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.vertices
            .extend(shapes::rect(min, size, color.to_array()));
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.vertices.extend(shapes::ellipse(
            center,
            radii,
            color.to_array(),
            self.segments,
        ));
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, line_width: f32) {
        self.vertices.extend(shapes::ellipse_ring(
            center,
            radii,
            line_width,
            color.to_array(),
            self.segments,
        ));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32) {
        self.vertices
            .extend(shapes::line(from, to, line_width, color.to_array()));
    }
}
