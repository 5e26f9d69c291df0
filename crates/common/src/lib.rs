//! Shared value types used across the lightlab workspace.

mod color;
mod types;

pub use color::Color;
pub use types::Transform;
