use super::wall::{CollisionSide, Wall};
use crate::core::{Aabb, Vector2D};

/// Moving axis-aligned body: the mutable half of every physics query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vector2D,
    pub size: Vector2D,
    pub velocity: Vector2D,
}

impl Body {
    /// Create a body at rest
    pub fn new(position: Vector2D, size: Vector2D) -> Self {
        Self {
            position,
            size,
            velocity: Vector2D::ZERO,
        }
    }

    /// Current collision box
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Explicit Euler step using the velocity from the previous frame
    pub fn integrate(&mut self, dt: f32) {
        self.position = self.position + self.velocity * dt;
    }
}

/// Push `body` out of every wall it overlaps, in list order.
///
/// Single pass: each wall is resolved against the body as it stands after
/// the previous walls, nothing is re-tested. Two walls penetrated at once on
/// different axes can leave a residual overlap until the next frame.
///
/// Horizontal contacts reflect the horizontal velocity when `crouching`
/// (slide bounce) and stop it otherwise. Returns whether any wall was landed
/// on from above.
pub fn resolve_collisions(body: &mut Body, crouching: bool, walls: &[Wall]) -> bool {
    let mut grounded = false;

    for wall in walls {
        let collision = wall.resolve(&body.bounds());
        let bounds = wall.bounds();

        if collision.side != CollisionSide::None {
            log::trace!(
                "collision {:?} depth {:.2} against wall at {:?}",
                collision.side,
                collision.distance,
                bounds.position
            );
        }

        match collision.side {
            CollisionSide::Left | CollisionSide::Right => {
                body.position.x = if collision.side == CollisionSide::Left {
                    bounds.left() - body.size.x
                } else {
                    bounds.right()
                };
                body.velocity.x = if crouching { -body.velocity.x } else { 0.0 };
            }
            CollisionSide::Top => {
                body.position.y = bounds.top() - body.size.y;
                body.velocity.y = 0.0;
                grounded = true;
            }
            CollisionSide::Bottom => {
                body.position.y = bounds.bottom();
                body.velocity.y = 0.0;
            }
            CollisionSide::None => {}
        }
    }

    grounded
}
