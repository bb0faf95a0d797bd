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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements, as sRGB hex
pub mod colors {
    pub const BACKGROUND: u32 = 0xf0f9ff;
    pub const GROUND_FILL: u32 = 0xe5e7eb;
    pub const GROUND_LINE: u32 = 0x9ca3af;
    pub const PLAYER: u32 = 0x2563eb;
    pub const PLAYER_DETAIL: u32 = 0x1e40af;
    pub const CACTUS: u32 = 0x16a34a;
    pub const BIRD: u32 = 0xdc2626;
    pub const BIRD_WING: u32 = 0x991b1b;

    /// Decode an sRGB hex color to linear RGBA for an sRGB surface
    pub fn linear(hex: u32) -> [f32; 4] {
        let channel = |shift: u32| {
            let c = ((hex >> shift) & 0xff) as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [channel(16), channel(8), channel(0), 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::colors;

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(colors::linear(0x000000), [0.0, 0.0, 0.0, 1.0]);
        let white = colors::linear(0xffffff);
        for c in &white[..3] {
            assert!((c - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_linear_channel_order() {
        let red = colors::linear(0xff0000);
        assert!(red[0] > 0.99 && red[1] == 0.0 && red[2] == 0.0);
    }
}
