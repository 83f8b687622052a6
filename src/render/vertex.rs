//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color, in screen pixels
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte distance between two vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.44, 0.77, 0.81, 1.0];
    pub const GROUND: [f32; 4] = [0.87, 0.85, 0.58, 1.0];
    pub const GRASS_LIGHT: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const GRASS_DARK: [f32; 4] = [0.33, 0.60, 0.12, 1.0];
    pub const BARRIER: [f32; 4] = [0.30, 0.62, 0.22, 1.0];
    pub const ACTOR: [f32; 4] = [0.98, 0.78, 0.17, 1.0];
    pub const WING: [f32; 4] = [0.95, 0.95, 0.90, 1.0];
    pub const PLANE: [f32; 4] = [0.85, 0.85, 0.90, 1.0];
    pub const PROPELLER: [f32; 4] = [0.25, 0.25, 0.30, 1.0];
    pub const FIREWORK: [[f32; 4]; 3] = [
        [1.0, 0.35, 0.35, 1.0],
        [1.0, 0.90, 0.30, 1.0],
        [0.45, 0.70, 1.0, 1.0],
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::COLOR_OFFSET, 8);
        let vertices = [Vertex::new(1.0, 2.0, colors::SKY); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 3 * Vertex::STRIDE);
    }
}
