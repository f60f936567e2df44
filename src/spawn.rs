//! Spawn context for star initialization.
//!
//! Each star is spawned with its own seeded RNG so repopulation does not
//! thread a single generator through the loop. The helpers cover the
//! random draws a spawn needs plus the HSL color model the field uses.

use crate::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Context handed to the spawn function for one star.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context for the star at `index`.
    pub(crate) fn new(index: u32) -> Self {
        // Seed per index for variety within a repopulation, different
        // across program runs.
        let seed = index as u64
            ^ (std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42));

        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Color from HSL values.
    ///
    /// * `hue` - degrees, wraps around 360
    /// * `saturation` - 0.0 (gray) to 1.0 (vivid)
    /// * `lightness` - 0.0 (black) through 0.5 (pure hue) to 1.0 (white)
    pub fn hsl(&self, hue: f32, saturation: f32, lightness: f32) -> Vec3 {
        hsl_to_rgb(hue, saturation, lightness)
    }
}

/// Convert HSL (hue in degrees) to RGB.
pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_range_bounds() {
        let mut ctx = SpawnContext::new(0);
        for _ in 0..100 {
            let v = ctx.random_range(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
    }

    #[test]
    fn test_hsl_red() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red.x - 1.0).abs() < 0.001);
        assert!(red.y < 0.001);
        assert!(red.z < 0.001);
    }

    #[test]
    fn test_hsl_zero_saturation_is_gray() {
        // Saturation 0 must ignore the hue entirely.
        for hue in [0.0, 140.0, 260.0] {
            let gray = hsl_to_rgb(hue, 0.0, 0.8);
            assert!((gray.x - 0.8).abs() < 0.001);
            assert!((gray.y - 0.8).abs() < 0.001);
            assert!((gray.z - 0.8).abs() < 0.001);
        }
    }

    #[test]
    fn test_hsl_wraps_hue() {
        let a = hsl_to_rgb(380.0, 1.0, 0.5);
        let b = hsl_to_rgb(20.0, 1.0, 0.5);
        assert!((a - b).length() < 0.001);
    }

    #[test]
    fn test_hsl_full_lightness_is_white() {
        let white = hsl_to_rgb(200.0, 1.0, 1.0);
        assert!((white - Vec3::ONE).length() < 0.001);
    }
}
