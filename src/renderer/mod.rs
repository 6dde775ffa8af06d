//! WebGPU rendering module
//!
//! The scene is rebuilt from the simulation every frame as a list of flat
//! colored triangles in playfield space.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
