//! Render shader and the GPU-side data layouts it consumes.
//!
//! One instanced quad per visible sprite. The vertex stage expands the
//! quad to cover the star core plus its glow halo and converts pixel
//! coordinates to clip space; the fragment stage cuts out the circle and
//! fades the halo.

use bytemuck::{Pod, Zeroable};

/// Per-instance vertex data, one record per projected sprite.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Screen position in pixels.
    pub center: [f32; 2],
    /// Core radius in pixels.
    pub radius: f32,
    /// Halo extent in pixels beyond the core.
    pub halo: f32,
    /// RGB color.
    pub color: [f32; 3],
    pub _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    /// Viewport size in pixels.
    pub viewport: [f32; 2],
    pub _pad: [f32; 2],
}

pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    viewport: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) offset: vec2<f32>,
    @location(2) radius: f32,
    @location(3) halo: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) halo: f32,
    @location(3) color: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[vertex_index];
    let extent = radius + halo;
    let offset = corner * extent;
    let pos_px = center + offset;

    let ndc = vec2<f32>(
        pos_px.x / uniforms.viewport.x * 2.0 - 1.0,
        1.0 - pos_px.y / uniforms.viewport.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    out.offset = offset;
    out.radius = radius;
    out.halo = halo;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.offset);
    if dist <= in.radius {
        return vec4<f32>(in.color, 1.0);
    }
    if in.halo <= 0.0 {
        discard;
    }
    let t = (dist - in.radius) / in.halo;
    if t >= 1.0 {
        discard;
    }
    // Quadratic falloff reads as a soft glow rather than a hard disc.
    let alpha = (1.0 - t) * (1.0 - t) * 0.5;
    return vec4<f32>(in.color, alpha);
}
"#;

impl From<&crate::star::Sprite> for SpriteInstance {
    fn from(sprite: &crate::star::Sprite) -> Self {
        Self {
            center: [sprite.x, sprite.y],
            radius: sprite.radius,
            halo: sprite.halo,
            color: sprite.color.to_array(),
            _pad: 0.0,
        }
    }
}
