//! WebGPU rendering module
//!
//! Every frame is a full redraw of flat-colored triangles built from game state.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
