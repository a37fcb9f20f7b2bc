//! Key mapping from terminal events to packet commands.

use crate::types::PacketAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a packet command.
pub fn map_key(key: KeyEvent) -> Option<PacketAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(PacketAction::ShiftLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(PacketAction::ShiftRight),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(PacketAction::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            Some(PacketAction::RotateCcw)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key requests a fresh round (used on the game-over screen).
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(PacketAction::ShiftLeft)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Right)),
            Some(PacketAction::ShiftRight)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('a'))),
            Some(PacketAction::ShiftLeft)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('L'))),
            Some(PacketAction::ShiftRight)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Up)),
            Some(PacketAction::RotateCw)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('z'))),
            Some(PacketAction::RotateCcw)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('x'))),
            Some(PacketAction::RotateCw)
        );
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Esc)));
    }

    #[test]
    fn test_restart_key() {
        assert!(is_restart(KeyEvent::from(KeyCode::Char('r'))));
        assert!(is_restart(KeyEvent::from(KeyCode::Char('R'))));
        assert!(!is_restart(KeyEvent::from(KeyCode::Char('t'))));
    }
}
