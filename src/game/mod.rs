// Game layer: the player, its animations, and levels
//
// - `stats`: movement constants
// - `animation`: frame timing and frame image paths
// - `state`: which animation the player's motion calls for
// - `player`: movement, crouching, collisions, drawing
// - `level`: level files and the per-frame step

pub mod animation;
pub mod level;
pub mod player;
pub mod state;
pub mod stats;

pub use level::Level;
