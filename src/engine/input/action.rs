// Game actions and their default key bindings

use winit::keyboard::KeyCode;

/// Everything the keyboard can ask of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    Crouch,
    /// Held with a direction to walk instead of run
    Walk,

    // Meta actions
    Pause,
    Quit,
    ToggleDebug,
}

/// Default keyboard layout
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        // Movement (WASD)
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::KeyW, Action::Jump),
        (KeyCode::KeyS, Action::Crouch),
        (KeyCode::ShiftLeft, Action::Walk),
        (KeyCode::ShiftRight, Action::Walk),
        // Meta
        (KeyCode::KeyP, Action::Pause),
        (KeyCode::Escape, Action::Quit),
        (KeyCode::F3, Action::ToggleDebug),
    ]
}
