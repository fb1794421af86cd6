//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements, as sRGB-encoded RGBA (the usual 0-255 values / 255)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_FULL: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const PLAYER_HURT: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PLAYER_CRITICAL: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const PLAYER_DEAD: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PROJECTILE: [f32; 4] = [139.0 / 255.0, 0.0, 0.0, 1.0];

    /// Decode an sRGB colour to linear light for an `*Srgb` surface, which
    /// re-encodes on write. Alpha is already linear.
    pub fn srgb_to_linear(color: [f32; 4]) -> [f32; 4] {
        let decode = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [decode(color[0]), decode(color[1]), decode(color[2]), color[3]]
    }

}
