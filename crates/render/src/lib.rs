//! Rendering Adapter: renderer-agnostic target trait, orbit camera controls,
//! resize handling and the Animation Driver.
//!
//! # Invariants
//! - A render target reads the scene; it never mutates it.
//! - Each driver step renders exactly once and updates the camera exactly once.
//! - Mesh orientation is a function of elapsed time only.

pub mod camera;
pub mod driver;
pub mod renderer;
pub mod viewport;

pub use camera::{CameraControl, CameraView, OrbitControls};
pub use driver::{AnimationDriver, DriverState, FailurePolicy, StepError, StepOutcome, StopSignal};
pub use renderer::{DebugTextRenderer, RenderTarget, describe};
pub use viewport::{MAX_PIXEL_RATIO, Viewport};
