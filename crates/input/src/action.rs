use glam::Vec2;

/// A high-level action produced from pointer or window input.
///
/// Hosts translate their native events into actions so the camera and the
/// viewport stay independent of the windowing library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Rotate the camera about its target by a drag delta in pixels.
    Orbit(Vec2),
    /// Dolly toward (positive) or away from (negative) the target, in
    /// scroll lines.
    Zoom(f32),
    /// The drawable area changed size.
    Resize {
        width: u32,
        height: u32,
        scale_factor: f32,
    },
    /// Input with no camera meaning.
    Noop,
}

impl Action {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_carries_delta() {
        let a = Action::Orbit(Vec2::new(3.0, -1.0));
        assert!(matches!(a, Action::Orbit(d) if d.x == 3.0 && d.y == -1.0));
    }

    #[test]
    fn noop_is_noop() {
        assert!(Action::Noop.is_noop());
        assert!(!Action::Zoom(1.0).is_noop());
    }
}
