// Keyboard input
//
// - `action`: game actions and the default key layout
// - `config`: key to action bindings
// - `player`: held and just-pressed action state
// - `manager`: feeds winit key events into the above
//
// Per frame: forward every `KeyEvent` to `InputManager::process_keyboard_event`,
// read `InputManager::player()` during the update, then call
// `InputManager::update()` to clear the edges.

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

pub use action::Action;
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::PlayerInput;
