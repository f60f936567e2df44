//! Pointer tracking over the rendering surface.
//!
//! The field only needs the cursor position in surface pixels. The
//! surface fills the window, so window cursor coordinates are used
//! directly.

use winit::event::WindowEvent;

use crate::Vec2;

/// Tracked pointer state.
#[derive(Debug, Default)]
pub struct Pointer {
    position: Vec2,
}

impl Pointer {
    /// Create a pointer tracker at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in surface pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Process a window event, recording cursor movement.
    ///
    /// Returns `true` if the event carried a new cursor position.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::CursorMoved { position, .. } = event {
            self.position = Vec2::new(position.x as f32, position.y as f32);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_origin() {
        let pointer = Pointer::new();
        assert_eq!(pointer.position(), Vec2::ZERO);
    }
}
