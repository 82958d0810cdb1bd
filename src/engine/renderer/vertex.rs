// Vertex structure for 2D quad rendering

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// Vertex for 2D quads in level space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in level units (y down)
    pub position: [f32; 2],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
    /// Vertex color (RGBA), multiplied with the texel
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: Vec2, tex_coords: Vec2, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
            color: color.to_array(),
        }
    }

    /// Corners of a textured rectangle, clockwise from the top-left.
    ///
    /// Mirroring swaps the horizontal texture coordinates, so the image
    /// flips around the rectangle's centre.
    pub fn quad(position: Vec2, size: Vec2, color: Vec4, flip_horizontal: bool) -> [Vertex; 4] {
        let (u_left, u_right) = if flip_horizontal { (1.0, 0.0) } else { (0.0, 1.0) };
        [
            Vertex::new(position, Vec2::new(u_left, 0.0), color),
            Vertex::new(position + Vec2::new(size.x, 0.0), Vec2::new(u_right, 0.0), color),
            Vertex::new(position + size, Vec2::new(u_right, 1.0), color),
            Vertex::new(position + Vec2::new(0.0, size.y), Vec2::new(u_left, 1.0), color),
        ]
    }

    /// Index pattern for one quad starting at `base`
    pub fn quad_indices(base: u32) -> [u32; 6] {
        [base, base + 1, base + 2, base, base + 2, base + 3]
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
