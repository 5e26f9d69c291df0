//! wgpu render backend for the light lab.
//!
//! Draws the registry's meshes lit by up to eight lights, overlays light
//! helpers as line lists, and implements [`lightlab_render::RenderTarget`]
//! for a window surface.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - GPU geometry is rebuilt only when a mesh's shape changes.
//! - The swapchain always matches the window; render resolution follows the
//!   capped pixel ratio.

mod geometry;
mod gpu;
mod shaders;
mod surface;

pub use geometry::{MeshData, Vertex};
pub use gpu::{MAX_LIGHTS, SceneRenderer};
pub use surface::{SurfaceError, SurfaceTarget};
