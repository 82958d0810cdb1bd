// Turns winit keyboard events into player input

use super::config::InputConfig;
use super::player::PlayerInput;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Owns the key bindings and the local player's action state
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
    /// Physical keys currently down, so an action bound to two keys
    /// stays held until both are released
    held_keys: HashSet<KeyCode>,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
            held_keys: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state, event.repeat);
        }
    }

    fn process_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        let Some(action) = self.config.get_action(key) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                // OS auto-repeat must not retrigger edges
                if repeat {
                    return;
                }
                self.held_keys.insert(key);
                self.player.press(action);
            }
            ElementState::Released => {
                self.held_keys.remove(&key);
                let still_held = self
                    .config
                    .keys_for(action)
                    .iter()
                    .any(|k| self.held_keys.contains(k));
                if !still_held {
                    self.player.release(action);
                }
            }
        }
    }

    /// Start a new frame; call once after the frame's input was consumed
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Forget all held keys
    pub fn reset(&mut self) {
        self.held_keys.clear();
        self.player.reset();
    }
}
