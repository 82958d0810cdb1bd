// Player movement tuning. One set of numbers, shared by every level.

use crate::core::Vector2D;

/// Movement constants for the player body
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    // Movement
    /// Horizontal speed cap (units/second)
    pub speed: f32,
    /// Horizontal acceleration while a direction is held
    pub acceleration: f32,
    /// Vertical speed cap, both directions
    pub vertical_speed_cap: f32,
    /// Jump impulse multiplier applied to the acceleration
    pub jump_force: f32,
    /// Acceleration divisor while the walk modifier is held
    pub walk_divisor: f32,

    // Physics
    /// Downward acceleration (y grows downwards)
    pub gravity: f32,
    /// Longest frame the simulation will integrate in one step
    pub max_frame_dt: f32,

    // Dimensions
    /// Collision box while standing
    pub standing_size: Vector2D,
    /// Height removed from the collision box while crouched
    pub crouch_delta: f32,
    /// On-screen size of every animation frame
    pub animation_size: Vector2D,

    // Friction
    /// Friction ticks per second
    pub friction_rate: f64,
    pub crouch_friction: f32,
    pub air_friction: f32,
    pub ground_friction: f32,

    /// Speed below which the player counts as standing still for animation
    pub animation_threshold: f32,
}

/// The player stats every level uses
pub const BASE_STATS: PlayerStats = PlayerStats {
    speed: 750.0,
    acceleration: 750.0 * 10.0,
    vertical_speed_cap: 750.0 * 5.0,
    jump_force: 30.0,
    walk_divisor: 3.0,

    gravity: 4000.0,
    max_frame_dt: 0.1,

    standing_size: Vector2D::new(40.0, 96.0),
    crouch_delta: 40.0,
    animation_size: Vector2D::new(96.0, 96.0),

    friction_rate: 150.0,
    crouch_friction: 0.99,
    air_friction: 0.9,
    ground_friction: 0.8,

    animation_threshold: 100.0,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    pub fn standard() -> Self {
        BASE_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_constants() {
        let stats = PlayerStats::standard();
        assert_eq!(stats.acceleration, 7500.0);
        assert_eq!(stats.vertical_speed_cap, 3750.0);
        assert_eq!(stats.standing_size.y - stats.crouch_delta, 56.0);
    }

    #[test]
    fn test_standard_equals_default() {
        assert_eq!(PlayerStats::standard(), PlayerStats::default());
    }

    #[test]
    fn test_friction_ordering() {
        // Sliding keeps the most speed, standing on ground the least
        let stats = PlayerStats::standard();
        assert!(stats.crouch_friction > stats.air_friction);
        assert!(stats.air_friction > stats.ground_friction);
    }
}
