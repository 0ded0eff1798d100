//! Input handling - convert key events to session commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uc_core::Step;

/// A single player intent, decoded from one key press. The app layer
/// applies it to the session and repaints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move one cell relative to the current facing.
    Step(Step),
    /// Rotate facing by quarter turns (+1 clockwise, -1 counter).
    Rotate(i32),
    /// Climb the up staircase under the player.
    Ascend,
    /// Take the down staircase under the player.
    Descend,
    /// Open a treasure chest on the current cell.
    OpenChest,
    /// Toggle the reveal-the-whole-map override.
    ToggleRevealAll,
    /// Quit the game.
    Quit,
}

/// Convert a key event to a command.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        // Arrows move in view space: up/down walk, left/right turn.
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Step(Step::Forward)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Step(Step::Backward)),
        KeyCode::Left => Some(Command::Rotate(-1)),
        KeyCode::Right => Some(Command::Rotate(1)),

        // Strafe without turning
        KeyCode::Char('a') => Some(Command::Step(Step::StepLeft)),
        KeyCode::Char('d') => Some(Command::Step(Step::StepRight)),

        KeyCode::Char('<') => Some(Command::Ascend),
        KeyCode::Char('>') => Some(Command::Descend),
        KeyCode::Char('o') => Some(Command::OpenChest),
        KeyCode::Char('m') => Some(Command::ToggleRevealAll),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),

        _ => None,
    }
}
