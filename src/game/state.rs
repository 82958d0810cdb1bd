// Which animation the player's motion calls for

use super::animation::AnimationKind;
use crate::core::Vector2D;

/// Snapshot of everything animation selection looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub on_ground: bool,
    pub crouching: bool,
    pub velocity: Vector2D,
    /// Walk modifier held
    pub walking: bool,
}

/// Pick the animation for `state`.
///
/// Rules are applied in priority order, each later match overriding the
/// earlier ones: idle, falling, jumping, walking/running, crouching.
/// `None` means no rule matched and the current animation should stay.
pub fn select_animation(state: &MotionState, threshold: f32) -> Option<AnimationKind> {
    let vx = state.velocity.x.abs();
    let vy = state.velocity.y;
    let mut selected = None;

    if state.on_ground && vx < threshold {
        selected = Some(AnimationKind::Idle);
    }
    if !state.on_ground && vy > threshold {
        selected = Some(AnimationKind::Falling);
    }
    if !state.on_ground && vy < -threshold {
        selected = Some(AnimationKind::Jumping);
    }
    if state.on_ground && vx > threshold {
        selected = Some(if state.walking {
            AnimationKind::Walking
        } else {
            AnimationKind::Running
        });
    }
    if state.crouching {
        selected = Some(AnimationKind::Crouching);
    }

    selected
}

/// Facing after moving with `velocity_x`; unchanged when standing still
pub fn facing_inverted(velocity_x: f32, inverted: bool) -> bool {
    if velocity_x < 0.0 {
        true
    } else if velocity_x > 0.0 {
        false
    } else {
        inverted
    }
}
