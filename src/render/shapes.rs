//! Shape generation for 2D primitives
//!
//! Every shape is emitted as a triangle list appended to `out`.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, rect: &Rect, color: [f32; 4]) {
    if rect.is_empty() {
        return;
    }
    let (min, max) = (rect.min, rect.max);

    // Two triangles
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// Rectangle of `size` centred on `center`, rotated by `degrees` (clockwise
/// on screen, since y points down)
pub fn rotated_rect(out: &mut Vec<Vertex>, center: Vec2, size: Vec2, degrees: f32, color: [f32; 4]) {
    let rotation = Vec2::from_angle(degrees.to_radians());
    let half = size / 2.0;
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(-half.x, half.y),
        Vec2::new(half.x, half.y),
    ]
    .map(|corner| center + rotation.rotate(corner));

    for index in [0, 1, 2, 2, 1, 3] {
        out.push(Vertex::new(corners[index].x, corners[index].y, color));
    }
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_is_two_triangles() {
        let mut out = Vec::new();
        rect(&mut out, &Rect::new(0.0, 0.0, 10.0, 5.0), [1.0; 4]);
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|v| v.position[0] <= 10.0 && v.position[1] <= 5.0));
    }

    #[test]
    fn test_empty_rect_emits_nothing() {
        let mut out = Vec::new();
        rect(&mut out, &Rect::new(10.0, 0.0, 10.0, 5.0), [1.0; 4]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_rotated_rect_keeps_center() {
        let mut out = Vec::new();
        let center = Vec2::new(50.0, 50.0);
        rotated_rect(&mut out, center, Vec2::new(20.0, 10.0), 45.0, [1.0; 4]);
        assert_eq!(out.len(), 6);
        let sum = out
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc + Vec2::from(v.position));
        assert!((sum / 6.0 - center).length() < 1e-3);
    }

    #[test]
    fn test_circle_vertex_count() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::ZERO, 5.0, [1.0; 4], 12);
        assert_eq!(out.len(), 36);
    }
}
