//! Shape tessellation for 2D primitives
//!
//! Every shape becomes a flat triangle list.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

fn ellipse_point(center: Vec2, radii: Vec2, theta: f32) -> Vec2 {
    center + radii * Vec2::new(theta.cos(), theta.sin())
}

/// Filled ellipse as a triangle fan
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let p1 = ellipse_point(center, radii, theta1);
        let p2 = ellipse_point(center, radii, theta2);

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Ellipse outline of the given line width, centered on the ellipse edge
pub fn ellipse_ring(
    center: Vec2,
    radii: Vec2,
    line_width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let half = Vec2::splat(line_width / 2.0);
    let inner = (radii - half).max(Vec2::ZERO);
    let outer = radii + half;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        let inner1 = ellipse_point(center, inner, theta1);
        let outer1 = ellipse_point(center, outer, theta1);
        let inner2 = ellipse_point(center, inner, theta2);
        let outer2 = ellipse_point(center, outer, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Thick line segment as a quad
pub fn line(from: Vec2, to: Vec2, line_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (line_width / 2.0);

    let a1 = from + perp;
    let a2 = from - perp;
    let b1 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}
