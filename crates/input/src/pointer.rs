use crate::action::Action;
use glam::Vec2;

/// Pointer buttons, independent of any windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

/// Turns a stream of pointer events into orbit and zoom actions.
///
/// Dragging with the primary button orbits. Other buttons are ignored.
#[derive(Debug, Default)]
pub struct PointerTracker {
    dragging: bool,
    last: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn press(&mut self, button: Button) {
        if button == Button::Primary {
            self.dragging = true;
            tracing::trace!("orbit drag started");
        }
    }

    pub fn release(&mut self, button: Button) {
        if button == Button::Primary {
            self.dragging = false;
        }
    }

    /// Cursor moved to `position` (pixels). Emits an orbit while dragging.
    pub fn moved(&mut self, position: Vec2) -> Action {
        let previous = self.last.replace(position);
        match previous {
            Some(p) if self.dragging && p != position => Action::Orbit(position - p),
            _ => Action::Noop,
        }
    }

    /// Cursor left the window; the next move must not produce a jump.
    pub fn left(&mut self) {
        self.last = None;
    }

    /// Scroll wheel input in lines. Positive scrolls away from the user.
    pub fn scroll(&mut self, lines: f32) -> Action {
        if lines == 0.0 || !lines.is_finite() {
            Action::Noop
        } else {
            Action::Zoom(lines)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_without_drag_is_noop() {
        let mut p = PointerTracker::new();
        assert_eq!(p.moved(Vec2::new(10.0, 10.0)), Action::Noop);
        assert_eq!(p.moved(Vec2::new(20.0, 10.0)), Action::Noop);
    }

    #[test]
    fn primary_drag_orbits_by_delta() {
        let mut p = PointerTracker::new();
        p.moved(Vec2::new(10.0, 10.0));
        p.press(Button::Primary);
        assert_eq!(p.moved(Vec2::new(14.0, 7.0)), Action::Orbit(Vec2::new(4.0, -3.0)));
        p.release(Button::Primary);
        assert_eq!(p.moved(Vec2::new(20.0, 7.0)), Action::Noop);
    }

    #[test]
    fn secondary_button_does_not_orbit() {
        let mut p = PointerTracker::new();
        p.moved(Vec2::ZERO);
        p.press(Button::Secondary);
        assert!(!p.is_dragging());
        assert_eq!(p.moved(Vec2::ONE), Action::Noop);
    }

    #[test]
    fn first_move_after_leaving_does_not_jump() {
        let mut p = PointerTracker::new();
        p.press(Button::Primary);
        p.moved(Vec2::ZERO);
        p.left();
        assert_eq!(p.moved(Vec2::new(500.0, 500.0)), Action::Noop);
        assert_eq!(p.moved(Vec2::new(501.0, 500.0)), Action::Orbit(Vec2::X));
    }

    #[test]
    fn scroll_zooms() {
        let mut p = PointerTracker::new();
        assert_eq!(p.scroll(1.5), Action::Zoom(1.5));
        assert_eq!(p.scroll(0.0), Action::Noop);
        assert_eq!(p.scroll(f32::NAN), Action::Noop);
    }
}
