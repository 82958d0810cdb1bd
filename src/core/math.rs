// Math types shared by physics, gameplay and rendering

use glam::Vec2;

/// 2D vector used for positions, sizes and velocities.
///
/// Copy value type: `+ - * /` are component-wise and always produce a new
/// value. State that changes over time lives in an owning struct (see
/// `engine::physics::Body`) and is updated by assigning to its fields.
pub type Vector2D = Vec2;

/// Axis-aligned box in level space (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub position: Vector2D,
    pub size: Vector2D,
}

impl Aabb {
    pub fn new(position: Vector2D, size: Vector2D) -> Self {
        Self { position, size }
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }
}
