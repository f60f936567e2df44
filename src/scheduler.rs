//! Frame-loop cancellation.
//!
//! The render loop is driven by the host's redraw scheduling, one frame
//! at a time: the current frame must finish before the next is
//! requested. [`FrameLoop`] is the explicit cancellation token checked
//! at that boundary, so tearing down the window stops the loop at the
//! current frame and nothing runs afterwards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token for the frame loop.
///
/// Clones share the same flag. Cancelling is idempotent and cannot be
/// undone; a cancelled loop never schedules another frame.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    cancelled: Arc<AtomicBool>,
}

impl FrameLoop {
    /// Create a running (not cancelled) frame loop token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether the loop has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether another frame may be scheduled.
    #[inline]
    pub fn should_continue(&self) -> bool {
        !self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_running() {
        let frame_loop = FrameLoop::new();
        assert!(!frame_loop.is_cancelled());
        assert!(frame_loop.should_continue());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let frame_loop = FrameLoop::new();
        frame_loop.cancel();
        frame_loop.cancel();
        assert!(frame_loop.is_cancelled());
        assert!(!frame_loop.should_continue());
    }

    #[test]
    fn test_clones_share_state() {
        let frame_loop = FrameLoop::new();
        let handle = frame_loop.clone();
        handle.cancel();
        assert!(frame_loop.is_cancelled());
    }
}
