//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in arena pixels (converted to NDC at upload)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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
    use crate::sim::Phase;

    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const ARENA: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Phase overlay veil, 70% black
    pub const VEIL: [f32; 4] = [0.0, 0.0, 0.0, 0.7];

    /// Phase accent for the DOM HUD: green, yellow, orange, red
    pub fn phase_css(phase: Phase) -> &'static str {
        match phase {
            Phase::Basic => "#00ff00",
            Phase::Aim => "#ffff00",
            Phase::Mixed => "#ff8800",
            Phase::Hardcore => "#ff0000",
        }
    }
}
