//! Tunable options for a star field.
//!
//! Every knob the renderer recognizes lives here. All fields are plain
//! multipliers or switches; a default `FieldConfig` reproduces the stock
//! green-tinted monochrome backdrop.

/// Appearance and behavior options for a [`StarField`](crate::StarField).
///
/// # Example
///
/// ```
/// use galaxy::FieldConfig;
///
/// let config = FieldConfig {
///     density: 1.5,
///     saturation: 0.8,
///     hue_shift: 220.0,
///     ..FieldConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Multiplier on the particle count derived from viewport area.
    pub density: f32,
    /// Radius of the soft halo drawn under each star, as a fraction of
    /// star size. `0.0` disables the halo entirely.
    pub glow_intensity: f32,
    /// Color saturation in `[0, 1]`. `0.0` yields a grayscale field.
    pub saturation: f32,
    /// Base hue in degrees for colored fields, jittered +/-20 per star.
    pub hue_shift: f32,
    /// Amplitude of the periodic size oscillation. `0.0` disables twinkle.
    pub twinkle_intensity: f32,
    /// Angular velocity applied to every star's polar angle each frame.
    pub rotation_speed: f32,
    /// Multiplier on pointer-repulsion displacement.
    pub repulsion_strength: f32,
    /// Multiplier on per-star depth velocity.
    pub star_speed: f32,
    /// Global speed multiplier, stacked with `star_speed`.
    pub speed: f32,
    /// Master switch for pointer tracking.
    pub mouse_interaction: bool,
    /// Whether the tracked pointer repels nearby stars.
    pub mouse_repulsion: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            glow_intensity: 0.3,
            saturation: 0.0,
            hue_shift: 140.0,
            twinkle_intensity: 0.3,
            rotation_speed: 0.1,
            repulsion_strength: 2.0,
            star_speed: 0.5,
            speed: 1.0,
            mouse_interaction: true,
            mouse_repulsion: true,
        }
    }
}

impl FieldConfig {
    /// Whether the update step should read the pointer at all.
    #[inline]
    pub fn repulsion_enabled(&self) -> bool {
        self.mouse_interaction && self.mouse_repulsion
    }
}
