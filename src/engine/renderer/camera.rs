// Fixed 2D camera over the logical level area

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Orthographic camera mapping the logical level rectangle onto the window.
///
/// Level coordinates put the origin at the top-left with y growing
/// downwards, so the projection flips the vertical axis.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Top-left corner of the visible area in level units
    pub position: Vec2,
    /// Visible area in level units, independent of the window size
    logical_size: Vec2,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(position: Vec2, logical_width: f32, logical_height: f32) -> Self {
        let mut camera = Self {
            position,
            logical_size: Vec2::new(logical_width, logical_height),
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        let min = self.position;
        let max = self.position + self.logical_size;

        // Bottom and top swapped: level y grows downwards
        self.view_proj = Mat4::orthographic_rh(min.x, max.x, max.y, min.y, -1.0, 1.0);
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
