//! Scene kernel: the registry of lights, meshes and materials, the helper
//! visualizations derived from lights, and the time-driven mesh animation.
//!
//! # Invariants
//! - Entity names are unique for the registry's lifetime; nothing is removed.
//! - Helpers are derived from their light and refreshed by re-running the
//!   factory that built them.
//! - Mesh rotation is a pure function of elapsed time.

pub mod animation;
pub mod clock;
pub mod entity;
pub mod helper;
pub mod preset;
pub mod registry;

pub use animation::{AnimatedMesh, Animator};
pub use clock::{Clock, FixedStepClock, ManualClock, SystemClock};
pub use entity::{Entity, EntityKind, Light, LightKind, LightShape, Material, Mesh, Shape};
pub use helper::{Helper, HelperFactory, LineSegment, Tint};
pub use registry::{SceneError, SceneRegistry};
