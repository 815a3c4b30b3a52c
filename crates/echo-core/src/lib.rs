pub mod color;
pub mod config;
pub mod constants;
pub mod emitter;
pub mod lifecycle;
pub mod primitive;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod surface;

pub use color::*;
pub use config::*;
pub use emitter::*;
pub use lifecycle::*;
pub use primitive::*;
pub use render::*;
pub use scene::*;
pub use simulation::*;
pub use surface::*;
