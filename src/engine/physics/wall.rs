use glam::Vec4;

use crate::core::{Aabb, Vector2D};
use crate::engine::renderer::RenderSurface;

/// Fill colour for level geometry
pub const WALL_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Which face of a wall a penetrating box gets pushed out through
///
/// Declaration order matters: equal penetration depths resolve to the
/// first side listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionSide {
    /// Box is pushed out to the left of the wall
    Left,
    /// Box is pushed out to the right of the wall
    Right,
    /// Box is pushed up and rests on the wall
    Top,
    /// Box is pushed down below the wall
    Bottom,
    /// No overlap
    None,
}

/// Result of resolving a box against a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Penetration depth along the resolving axis (+inf when not touching)
    pub distance: f32,
    pub side: CollisionSide,
}

impl Collision {
    pub const NONE: Collision = Collision {
        distance: f32::INFINITY,
        side: CollisionSide::None,
    };
}

/// Static axis-aligned rectangle that bodies collide against.
///
/// Walls with zero or negative size are accepted as-is; they never produce
/// meaningful resolutions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    bounds: Aabb,
}

impl Wall {
    pub fn new(position: Vector2D, size: Vector2D) -> Self {
        Self {
            bounds: Aabb::new(position, size),
        }
    }

    /// Build a wall from level data (`x, y, w, h`)
    pub fn from_rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vector2D::new(x, y), Vector2D::new(w, h))
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let wall = &self.bounds;
        wall.left() < other.right()
            && wall.right() > other.left()
            && wall.top() < other.bottom()
            && wall.bottom() > other.top()
    }

    /// Find the shallowest way out of this wall for `other`.
    pub fn resolve(&self, other: &Aabb) -> Collision {
        if !self.overlaps(other) {
            return Collision::NONE;
        }

        let wall = &self.bounds;
        let candidates = [
            (other.right() - wall.left(), CollisionSide::Left),
            (wall.right() - other.left(), CollisionSide::Right),
            (other.bottom() - wall.top(), CollisionSide::Top),
            (wall.bottom() - other.top(), CollisionSide::Bottom),
        ];

        // Strict `<` keeps the earliest side on ties
        let mut best = Collision::NONE;
        for (distance, side) in candidates {
            if distance < best.distance {
                best = Collision { distance, side };
            }
        }
        best
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.fill_rect(self.bounds.position, self.bounds.size, WALL_COLOR);
    }
}
