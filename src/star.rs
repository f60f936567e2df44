//! Star records and the per-frame update and projection functions.
//!
//! A [`Star`] is a plain data record. All behavior lives in free
//! functions ([`spawn`], [`update`], [`project`]) so the simulation can
//! be stepped and inspected without a window or a GPU.
//!
//! Stars live in a pseudo-3D tunnel: `(x, y)` is a position in a plane
//! relative to the viewport center, `z` is depth toward the viewer.
//! Projection to screen space uses a perspective divide, so near stars
//! render larger and drift faster than far ones.

use std::f32::consts::TAU;

use rand::Rng;

use crate::config::FieldConfig;
use crate::spawn::SpawnContext;
use crate::{Vec2, Vec3};

/// Lower bound on rendered star size, applied after twinkle.
pub const MIN_SIZE: f32 = 0.1;

/// Pointer repulsion reaches stars projected within this many pixels.
pub const REPULSION_RADIUS: f32 = 200.0;

/// Per-star hue jitter around `hue_shift`, in degrees.
const HUE_JITTER: f32 = 20.0;

/// Twinkle oscillation rate in radians per elapsed second.
const TWINKLE_RATE: f32 = 5.0;

/// One star in the field.
///
/// `angle`/`radius` are the polar form of `(x, y)`; whenever one form is
/// rewritten the other is recomputed so the rotation step stays
/// consistent with pointer pushes and respawns.
#[derive(Debug, Clone)]
pub struct Star {
    /// Horizontal offset from viewport center.
    pub x: f32,
    /// Vertical offset from viewport center.
    pub y: f32,
    /// Depth toward the viewer, in `(0, viewport_width]`.
    pub z: f32,
    /// Current visual radius.
    pub size: f32,
    /// Resting radius the twinkle oscillates around.
    pub base_size: f32,
    /// RGB color, fixed at spawn.
    pub color: Vec3,
    /// Depth velocity, fixed at spawn.
    pub speed: f32,
    /// Phase offset so stars do not pulse in unison.
    pub twinkle_phase: f32,
    /// Polar angle of `(x, y)`.
    pub angle: f32,
    /// Polar radius of `(x, y)`.
    pub radius: f32,
}

/// Screen-space footprint of a star after projection, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Screen x in pixels.
    pub x: f32,
    /// Screen y in pixels.
    pub y: f32,
    /// Core radius in pixels.
    pub radius: f32,
    /// Glow halo extent in pixels beyond the core. Zero means no halo.
    pub halo: f32,
    /// RGB color.
    pub color: Vec3,
}

/// Everything the per-star update step reads besides the star itself.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    /// Tracked pointer position, `None` when interaction is off.
    pub pointer: Option<Vec2>,
    /// Elapsed time in seconds, drives the twinkle clock.
    pub time: f32,
    /// Field configuration.
    pub config: &'a FieldConfig,
}

/// Spawn a star uniformly over the viewport plane and depth range.
pub fn spawn(ctx: &mut SpawnContext, width: f32, height: f32, config: &FieldConfig) -> Star {
    let x = (ctx.random() - 0.5) * width;
    let y = (ctx.random() - 0.5) * height;
    let z = ctx.random() * width;

    let size = ctx.random() * 1.5;

    let hue = config.hue_shift + ctx.random_range(-HUE_JITTER, HUE_JITTER);
    let lightness = 0.7 + ctx.random() * 0.3;
    let color = ctx.hsl(hue, config.saturation, lightness);

    Star {
        x,
        y,
        z,
        size,
        base_size: size,
        color,
        speed: (ctx.random() * 0.5 + 0.1) * config.star_speed * config.speed,
        twinkle_phase: ctx.random() * 100.0,
        angle: ctx.random() * TAU,
        radius: (x * x + y * y).sqrt(),
    }
}

/// Advance one star by one frame.
///
/// Order matters: depth advance (with respawn on arrival), rotation,
/// pointer repulsion, twinkle. A star that respawns this frame skips the
/// remaining steps.
pub fn update(star: &mut Star, ctx: &FrameContext<'_>, rng: &mut impl Rng) {
    star.z -= star.speed * 2.0;
    if star.z <= 0.0 {
        respawn(star, ctx, rng);
        return;
    }

    star.angle += ctx.config.rotation_speed * 0.01;
    star.x = star.angle.cos() * star.radius;
    star.y = star.angle.sin() * star.radius;

    if ctx.config.repulsion_enabled() {
        if let Some(pointer) = ctx.pointer {
            repel(star, ctx, pointer);
        }
    }

    if ctx.config.twinkle_intensity > 0.0 {
        let twinkle = (ctx.time * TWINKLE_RATE + star.twinkle_phase).sin()
            * ctx.config.twinkle_intensity;
        star.size = (star.base_size + twinkle).max(MIN_SIZE);
    }
}

/// Recycle a star that reached the viewer back to the far plane.
///
/// The record is reused in place; respawning never allocates.
pub fn respawn(star: &mut Star, ctx: &FrameContext<'_>, rng: &mut impl Rng) {
    star.z = ctx.width;
    star.x = (rng.gen::<f32>() - 0.5) * ctx.width;
    star.y = (rng.gen::<f32>() - 0.5) * ctx.height;
    star.radius = (star.x * star.x + star.y * star.y).sqrt();
}

/// Push a star away from the pointer if its projection is close enough.
fn repel(star: &mut Star, ctx: &FrameContext<'_>, pointer: Vec2) {
    let (sx, sy, _) = perspective(star, ctx.width, ctx.height);
    let delta = Vec2::new(sx, sy) - pointer;
    let dist = delta.length();
    if dist >= REPULSION_RADIUS {
        return;
    }

    let force = (REPULSION_RADIUS - dist) / REPULSION_RADIUS;
    let push = delta.y.atan2(delta.x);
    star.x += push.cos() * force * ctx.config.repulsion_strength * 2.0;
    star.y += push.sin() * force * ctx.config.repulsion_strength * 2.0;

    // The push moved the Cartesian form, refresh the polar form.
    star.radius = (star.x * star.x + star.y * star.y).sqrt();
    star.angle = star.y.atan2(star.x);
}

/// Project a star to screen space.
///
/// Returns `None` when the projected point falls outside the viewport.
/// With `glow_intensity` at zero the sprite carries a zero halo, so no
/// glow state reaches the draw.
pub fn project(star: &Star, width: f32, height: f32, glow_intensity: f32) -> Option<Sprite> {
    let (sx, sy, scale) = perspective(star, width, height);
    if sx < 0.0 || sx > width || sy < 0.0 || sy > height {
        return None;
    }

    let halo = if glow_intensity > 0.0 {
        star.size * 10.0 * glow_intensity
    } else {
        0.0
    };

    Some(Sprite {
        x: sx,
        y: sy,
        radius: star.size * scale,
        halo,
        color: star.color,
    })
}

/// Perspective divide: scale coordinates inversely with depth.
#[inline]
fn perspective(star: &Star, width: f32, height: f32) -> (f32, f32, f32) {
    let half_w = width / 2.0;
    let scale = half_w / (half_w + star.z);
    (half_w + star.x * scale, height / 2.0 + star.y * scale, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    fn test_star(x: f32, y: f32, z: f32) -> Star {
        Star {
            x,
            y,
            z,
            size: 1.0,
            base_size: 1.0,
            color: Vec3::ONE,
            speed: 0.2,
            twinkle_phase: 0.0,
            angle: y.atan2(x),
            radius: (x * x + y * y).sqrt(),
        }
    }

    fn ctx(config: &FieldConfig, pointer: Option<Vec2>, time: f32) -> FrameContext<'_> {
        FrameContext {
            width: W,
            height: H,
            pointer,
            time,
            config,
        }
    }

    #[test]
    fn test_depth_advances_toward_viewer() {
        let config = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut star = test_star(10.0, 10.0, 500.0);
        update(&mut star, &ctx(&config, None, 0.0), &mut rng);
        assert!((star.z - (500.0 - 0.4)).abs() < 0.001);
    }

    #[test]
    fn test_respawn_resets_to_far_plane() {
        let config = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut star = test_star(10.0, 10.0, 0.1);
        update(&mut star, &ctx(&config, None, 0.0), &mut rng);

        assert_eq!(star.z, W);
        assert!(star.x.abs() <= W / 2.0);
        assert!(star.y.abs() <= H / 2.0);
        let expected = (star.x * star.x + star.y * star.y).sqrt();
        assert!((star.radius - expected).abs() < 0.001);
    }

    #[test]
    fn test_respawn_skips_rest_of_frame() {
        // A respawning star must not twinkle or rotate this frame.
        let config = FieldConfig {
            twinkle_intensity: 1.0,
            ..FieldConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let mut star = test_star(10.0, 10.0, 0.1);
        let angle_before = star.angle;
        update(&mut star, &ctx(&config, None, 0.3), &mut rng);

        assert_eq!(star.angle, angle_before);
        assert_eq!(star.size, star.base_size);
    }

    #[test]
    fn test_rotation_preserves_radius() {
        let config = FieldConfig {
            mouse_repulsion: false,
            twinkle_intensity: 0.0,
            ..FieldConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(4);
        let mut star = test_star(30.0, 40.0, 500.0);
        for _ in 0..50 {
            update(&mut star, &ctx(&config, None, 0.0), &mut rng);
        }
        assert!((star.radius - 50.0).abs() < 0.001);
        let from_cartesian = (star.x * star.x + star.y * star.y).sqrt();
        assert!((from_cartesian - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_size_floor_holds_under_heavy_twinkle() {
        let config = FieldConfig {
            twinkle_intensity: 50.0,
            ..FieldConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(5);
        let mut star = test_star(10.0, 10.0, 500.0);
        for i in 0..200 {
            update(&mut star, &ctx(&config, None, i as f32 * 0.016), &mut rng);
            assert!(star.size >= MIN_SIZE);
        }
    }

    #[test]
    fn test_twinkle_disabled_keeps_base_size() {
        let config = FieldConfig {
            twinkle_intensity: 0.0,
            ..FieldConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(6);
        let mut star = test_star(10.0, 10.0, 500.0);
        for i in 0..100 {
            update(&mut star, &ctx(&config, None, i as f32), &mut rng);
            assert_eq!(star.size, star.base_size);
        }
    }

    #[test]
    fn test_distant_pointer_does_not_displace() {
        let config = FieldConfig {
            rotation_speed: 0.0,
            twinkle_intensity: 0.0,
            ..FieldConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(7);
        // Star at the plane center projects to the viewport center.
        let mut star = test_star(0.0, 0.0, 100.0);
        // Pointer far in the corner, well outside the repulsion radius.
        let pointer = Vec2::new(0.0, 0.0);
        update(&mut star, &ctx(&config, Some(pointer), 0.0), &mut rng);

        assert_eq!(star.x, 0.0);
        assert_eq!(star.y, 0.0);
    }

    #[test]
    fn test_pointer_on_star_pushes_at_full_strength() {
        let config = FieldConfig {
            rotation_speed: 0.0,
            twinkle_intensity: 0.0,
            repulsion_strength: 2.0,
            ..FieldConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(8);
        let mut star = test_star(0.0, 0.0, 100.0);
        // Pointer exactly on the projected star: distance 0, force 1.
        let pointer = Vec2::new(W / 2.0, H / 2.0);
        update(&mut star, &ctx(&config, Some(pointer), 0.0), &mut rng);

        let displacement = (star.x * star.x + star.y * star.y).sqrt();
        assert!((displacement - 4.0).abs() < 0.001);
        // Polar form refreshed after the push.
        assert!((star.radius - displacement).abs() < 0.001);
    }

    #[test]
    fn test_repulsion_disabled_ignores_pointer() {
        let config = FieldConfig {
            rotation_speed: 0.0,
            twinkle_intensity: 0.0,
            mouse_repulsion: false,
            ..FieldConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let mut star = test_star(0.0, 0.0, 100.0);
        let pointer = Vec2::new(W / 2.0, H / 2.0);
        update(&mut star, &ctx(&config, Some(pointer), 0.0), &mut rng);

        assert_eq!(star.x, 0.0);
        assert_eq!(star.y, 0.0);
    }

    #[test]
    fn test_project_scales_with_depth() {
        let near = test_star(100.0, 0.0, 10.0);
        let far = test_star(100.0, 0.0, 700.0);

        let near_sprite = project(&near, W, H, 0.0).unwrap();
        let far_sprite = project(&far, W, H, 0.0).unwrap();

        assert!(near_sprite.radius > far_sprite.radius);
        // Near star lands further from center than the far one.
        assert!((near_sprite.x - W / 2.0) > (far_sprite.x - W / 2.0));
    }

    #[test]
    fn test_project_culls_offscreen() {
        // Large plane offset at near depth projects past the right edge.
        let star = test_star(900.0, 0.0, 1.0);
        assert!(project(&star, W, H, 0.3).is_none());
    }

    #[test]
    fn test_zero_glow_yields_zero_halo() {
        let star = test_star(0.0, 0.0, 100.0);
        let sprite = project(&star, W, H, 0.0).unwrap();
        assert_eq!(sprite.halo, 0.0);

        let glowing = project(&star, W, H, 0.3).unwrap();
        assert!((glowing.halo - star.size * 3.0).abs() < 0.001);
    }
}
