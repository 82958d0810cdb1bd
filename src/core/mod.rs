// Core math and shared value types

pub mod math;

pub use math::{Aabb, Vector2D};
