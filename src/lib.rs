//! # Galaxy - interactive pseudo-3D starfield renderer
//!
//! An ambient backdrop: point-like stars simulated in a depth-projected
//! tunnel, advanced once per display frame, drawn as glowing sprites,
//! reactive to pointer position and viewport size.
//!
//! ## Quick Start
//!
//! ```ignore
//! use galaxy::Galaxy;
//!
//! fn main() -> Result<(), galaxy::RunError> {
//!     Galaxy::new()
//!         .with_density(1.5)
//!         .with_saturation(0.8)
//!         .with_hue_shift(220.0)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Stars
//!
//! A [`Star`] is a plain record: a position in a plane centered on the
//! viewport, a depth `z` toward the viewer, a color fixed at spawn, and
//! a polar form kept in sync with the Cartesian one. Each frame every
//! star advances toward the viewer; a star that arrives is recycled back
//! to the far plane. The whole field slowly rotates, nearby stars flee
//! the pointer, and sizes oscillate with per-star phase offsets.
//!
//! ### Simulation vs. rendering
//!
//! [`StarField`] is completely headless: it owns the stars, the measured
//! viewport, and the pointer, and can be stepped and inspected in tests
//! with no window or GPU. The windowed runner projects the field into
//! [`Sprite`]s and hands them to an instanced wgpu pipeline.
//!
//! ### The frame loop
//!
//! Frames are scheduled one at a time: the current frame finishes, then
//! requests the next redraw, gated on a [`FrameLoop`] cancellation
//! token. Closing the window cancels the token, so no frame ever runs
//! against a torn-down surface.
//!
//! ### Failure posture
//!
//! The backdrop is decorative. A machine without a usable GPU gets one
//! logged warning and a silently disabled renderer; the rest of the
//! application is unaffected.

pub mod config;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod scheduler;
mod shader;
pub mod spawn;
pub mod star;
pub mod time;
mod window;

pub use config::FieldConfig;
pub use error::{GpuError, RunError};
pub use field::{StarField, AREA_PER_STAR};
pub use glam::{Vec2, Vec3};
pub use input::Pointer;
pub use scheduler::FrameLoop;
pub use spawn::SpawnContext;
pub use star::{FrameContext, Sprite, Star, MIN_SIZE, REPULSION_RADIUS};
pub use time::Time;
pub use window::Galaxy;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use galaxy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::field::StarField;
    pub use crate::scheduler::FrameLoop;
    pub use crate::star::{FrameContext, Sprite, Star};
    pub use crate::time::Time;
    pub use crate::window::Galaxy;
    pub use crate::{Vec2, Vec3};
}
