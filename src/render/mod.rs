//! Rendering: vertex types, shape tessellation, the scene draw routine and
//! the thread that drives it against a host surface

pub mod scene;
pub mod shapes;
pub mod surface;
pub mod thread;
pub mod vertex;

pub use scene::draw;
pub use surface::{Frame, Surface, SurfaceError};
pub use thread::{FrameDriver, RenderThread};
pub use vertex::Vertex;
