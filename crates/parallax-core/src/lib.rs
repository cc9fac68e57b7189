pub mod color;
pub mod constants;
pub mod coordinator;
pub mod geometry;
pub mod glyphs;
pub mod params;
pub mod particles;
pub mod run_loop;
pub mod scene;
pub mod state;
pub mod tween;

pub use color::*;
pub use constants::*;
pub use coordinator::*;
pub use geometry::*;
pub use glyphs::*;
pub use params::*;
pub use particles::*;
pub use run_loop::*;
pub use scene::*;
pub use state::*;
pub use tween::*;

// Shaders bundled as string constants
pub static TOON_WGSL: &str = include_str!("../shaders/toon.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
