//! Presentation layer
//!
//! Scene and HUD building are plain functions over [`crate::sim::GameState`];
//! `pipeline` owns the WebGPU objects that draw the resulting vertices.

pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use hud::Hud;
pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
