//! Pointer and window input mapped to camera actions.
//!
//! # Invariants
//! - Camera controls and the viewport consume actions, never raw window events.
//! - Input never touches the scene registry; only the parameter panel edits it.

pub mod action;
pub mod pointer;

pub use action::Action;
pub use pointer::{Button, PointerTracker};
