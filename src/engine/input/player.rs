// Held and edge-triggered action state for the local player

use super::action::Action;
use std::collections::HashSet;

/// Which actions are held, and which changed since the last frame
#[derive(Debug, Default, Clone)]
pub struct PlayerInput {
    /// Actions currently held down
    pressed: HashSet<Action>,

    /// Actions pressed since the last update
    just_pressed: HashSet<Action>,

    /// Actions released since the last update
    just_released: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    #[cfg(test)]
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press; pressing a held action is ignored
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Start a new frame: edges are cleared, held actions stay
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Release everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// -1 for left, 1 for right, 0 for neither or both
    pub fn horizontal(&self) -> f32 {
        let mut direction = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            direction -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            direction += 1.0;
        }
        direction
    }

    /// Exactly one of left and right is held
    pub fn single_horizontal_held(&self) -> bool {
        self.is_pressed(Action::MoveLeft) != self.is_pressed(Action::MoveRight)
    }
}
