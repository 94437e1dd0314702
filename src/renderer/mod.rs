//! WebGPU rendering module
//!
//! The scene is flat colored quads in arena pixels. Text (HUD, menu and
//! overlay captions) lives in the DOM on top of the canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, arena_to_ndc};
pub use scene::{build_scene, death_shake};
pub use vertex::Vertex;
