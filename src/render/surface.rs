//! Drawable surface adapter
//!
//! The host owns the real surface (a window, a canvas, a GPU swapchain) and
//! lends it to the render thread one frame at a time through [`Surface`].

use thiserror::Error;

use super::vertex::Vertex;

#[derive(Debug, Error)]
pub enum SurfaceError {
    /// No drawable target right now; try again next frame
    #[error("surface not ready")]
    NotReady,
    /// The target went away (resize, teardown in progress)
    #[error("surface lost")]
    Lost,
    #[error("surface error: {0}")]
    Other(String),
}

/// A frame being painted: surface size plus the triangle list to present
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub vertices: Vec<Vertex>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            vertices: Vec::new(),
        }
    }

    /// Reuse the allocation for the next frame
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Raw vertex bytes, ready for upload into a vertex buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Acquire/release pair the render thread drives every frame
pub trait Surface: Send + 'static {
    /// Lock a drawable target. May block until one is available.
    fn acquire(&mut self) -> Result<Frame, SurfaceError>;

    /// Hand the painted frame back for display
    fn present(&mut self, frame: Frame) -> Result<(), SurfaceError>;
}
