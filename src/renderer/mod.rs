//! Rendering module
//!
//! `scene` turns draw commands into primitives, `shapes` tessellates them and
//! `pipeline` pushes the resulting triangle list through WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, surface_size};
pub use scene::{
    DrawSurface, SceneStyle, VertexSurface, render_background, render_diameter_line, render_frame,
    render_point,
};
