// Physics: AABB walls, the moving body and its collision resolution

pub mod body;
mod debug;
pub mod wall;

pub use body::{resolve_collisions, Body};
pub use debug::DebugRenderer;
pub use wall::{CollisionSide, Wall};
