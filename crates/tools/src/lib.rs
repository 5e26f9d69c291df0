//! Developer Tooling: scene inspector and the live parameter panel.
//!
//! # Invariants
//! - The inspector never mutates the scene.
//! - The panel draws from a shared borrow and applies edits afterwards.

pub mod inspector;
pub mod panel;

pub use inspector::{LightInfo, MeshInfo, SceneInspector, SceneSnapshot, SceneSummary};
pub use panel::{PanelEdit, ParameterPanel};
