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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Placeholder ship color (no sprite asset)
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const ALIEN_TIER_3: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const ALIEN_TIER_2: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const ALIEN_TIER_1: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ALIEN_BULLET: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PAUSED_LABEL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

    /// Alien color keyed by point tier
    pub fn alien(tier: u8) -> [f32; 4] {
        match tier {
            3 => ALIEN_TIER_3,
            2 => ALIEN_TIER_2,
            _ => ALIEN_TIER_1,
        }
    }
}
