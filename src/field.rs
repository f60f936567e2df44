//! The star field simulation.
//!
//! [`StarField`] owns the particle set, the measured viewport, and the
//! tracked pointer. It is fully headless: the windowed runner feeds it
//! resize and pointer events and pulls projected sprites out each frame,
//! but nothing here touches winit or the GPU.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::spawn::SpawnContext;
use crate::star::{self, FrameContext, Sprite, Star};
use crate::Vec2;

/// Viewport area, in square pixels, covered by one star at density 1.
pub const AREA_PER_STAR: f32 = 4000.0;

/// A set of stars simulated over a measured viewport.
///
/// The field starts empty; the first [`resize`](StarField::resize)
/// populates it. Every resize discards the old set and repopulates to
/// `floor(width * height / 4000 * density)` stars.
pub struct StarField {
    config: FieldConfig,
    stars: Vec<Star>,
    width: f32,
    height: f32,
    pointer: Vec2,
    pointer_tracked: bool,
    rng: SmallRng,
}

impl StarField {
    /// Create an empty field. Call [`resize`](StarField::resize) with the
    /// measured viewport before stepping.
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            stars: Vec::new(),
            width: 0.0,
            height: 0.0,
            pointer: Vec2::ZERO,
            pointer_tracked: false,
            rng: SmallRng::from_entropy(),
        }
    }

    /// The field's configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// The current star set.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Number of stars in the field.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Whether the field holds no stars.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Measured viewport width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Measured viewport height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Re-measure the viewport and repopulate the field.
    ///
    /// The old star set is discarded and a new one is spawned, sized to
    /// the new area. A degenerate measurement (zero or negative extent)
    /// is skipped entirely; the next resize event retries.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        self.width = width;
        self.height = height;
        if !self.pointer_tracked {
            self.pointer = Vec2::new(width / 2.0, height / 2.0);
        }

        let count = (width * height / AREA_PER_STAR * self.config.density)
            .floor()
            .max(0.0) as usize;

        self.stars.clear();
        self.stars.reserve(count);
        for i in 0..count {
            let mut ctx = SpawnContext::new(i as u32);
            self.stars
                .push(star::spawn(&mut ctx, width, height, &self.config));
        }
    }

    /// Record the tracked pointer position, in surface pixels.
    ///
    /// Ignored while `mouse_interaction` is off.
    pub fn set_pointer(&mut self, position: Vec2) {
        if !self.config.mouse_interaction {
            return;
        }
        self.pointer = position;
        self.pointer_tracked = true;
    }

    /// The pointer position the update step will read.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Advance every star by one frame.
    ///
    /// `time` is elapsed seconds since the field started animating; it
    /// drives the twinkle clock.
    pub fn step(&mut self, time: f32) {
        let ctx = FrameContext {
            width: self.width,
            height: self.height,
            pointer: self.config.mouse_interaction.then_some(self.pointer),
            time,
            config: &self.config,
        };

        for s in &mut self.stars {
            star::update(s, &ctx, &mut self.rng);
        }
    }

    /// Project every star into `out`, culling offscreen ones.
    ///
    /// `out` is cleared first and reused across frames, so steady-state
    /// frames do not allocate.
    pub fn sprites(&self, out: &mut Vec<Sprite>) {
        out.clear();
        for s in &self.stars {
            if let Some(sprite) =
                star::project(s, self.width, self.height, self.config.glow_intensity)
            {
                out.push(sprite);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_matches_area_formula() {
        let mut field = StarField::new(FieldConfig {
            density: 1.5,
            ..FieldConfig::default()
        });
        field.resize(800.0, 600.0);
        // floor(800 * 600 / 4000 * 1.5)
        assert_eq!(field.len(), 180);
    }

    #[test]
    fn test_zero_density_yields_empty_field() {
        let mut field = StarField::new(FieldConfig {
            density: 0.0,
            ..FieldConfig::default()
        });
        field.resize(800.0, 600.0);
        assert!(field.is_empty());

        // Stepping an empty field must be a no-op, not a panic.
        field.step(1.0);
    }

    #[test]
    fn test_degenerate_resize_is_skipped() {
        let mut field = StarField::new(FieldConfig::default());
        field.resize(800.0, 600.0);
        let count = field.len();

        field.resize(0.0, 600.0);
        assert_eq!(field.width(), 800.0);
        assert_eq!(field.len(), count);

        field.resize(800.0, 0.0);
        assert_eq!(field.height(), 600.0);
    }

    #[test]
    fn test_resize_repopulates() {
        let mut field = StarField::new(FieldConfig::default());
        field.resize(800.0, 600.0);
        assert_eq!(field.len(), 120);

        field.resize(400.0, 300.0);
        assert_eq!(field.len(), 30);
    }

    #[test]
    fn test_spawned_depth_in_range() {
        let mut field = StarField::new(FieldConfig::default());
        field.resize(640.0, 480.0);
        for s in field.stars() {
            assert!(s.z >= 0.0 && s.z <= 640.0);
            assert!(s.x.abs() <= 320.0);
            assert!(s.y.abs() <= 240.0);
        }
    }

    #[test]
    fn test_pointer_defaults_to_center_until_tracked() {
        let mut field = StarField::new(FieldConfig::default());
        field.resize(800.0, 600.0);
        assert_eq!(field.pointer(), Vec2::new(400.0, 300.0));

        // Resizing before any cursor event re-centers the default.
        field.resize(400.0, 400.0);
        assert_eq!(field.pointer(), Vec2::new(200.0, 200.0));

        // A real cursor event pins the pointer across resizes.
        field.set_pointer(Vec2::new(17.0, 23.0));
        field.resize(800.0, 600.0);
        assert_eq!(field.pointer(), Vec2::new(17.0, 23.0));
    }

    #[test]
    fn test_pointer_ignored_when_interaction_off() {
        let mut field = StarField::new(FieldConfig {
            mouse_interaction: false,
            ..FieldConfig::default()
        });
        field.resize(800.0, 600.0);
        field.set_pointer(Vec2::new(10.0, 10.0));
        assert_eq!(field.pointer(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_step_keeps_depth_positive() {
        let mut field = StarField::new(FieldConfig {
            // Crank speed so plenty of stars wrap during the test.
            speed: 100.0,
            ..FieldConfig::default()
        });
        field.resize(400.0, 300.0);
        for i in 0..100 {
            field.step(i as f32 * 0.016);
            for s in field.stars() {
                assert!(s.z > 0.0);
                assert!(s.z <= 400.0);
            }
        }
    }

    #[test]
    fn test_sprites_reuses_buffer() {
        let mut field = StarField::new(FieldConfig::default());
        field.resize(400.0, 300.0);
        field.step(0.016);

        let mut out = Vec::new();
        field.sprites(&mut out);
        let first = out.len();
        assert!(first > 0);
        assert!(first <= field.len());

        // Second call clears before refilling.
        field.sprites(&mut out);
        assert_eq!(out.len(), first);
    }

    #[test]
    fn test_sprites_carry_no_halo_when_glow_disabled() {
        let mut field = StarField::new(FieldConfig {
            glow_intensity: 0.0,
            ..FieldConfig::default()
        });
        field.resize(400.0, 300.0);
        let mut out = Vec::new();
        field.sprites(&mut out);
        assert!(out.iter().all(|s| s.halo == 0.0));
    }
}
