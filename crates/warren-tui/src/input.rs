//! Input handling - convert key events to player orders
//!
//! These are the bindings that map directly to a [`PlayerAction`].
//! Menu navigation, log paging and quitting are handled in app.rs.

use crossterm::event::{KeyCode, KeyEvent};

use warren_core::geometry::Direction;
use warren_core::turn::PlayerAction;

/// Convert a key event to a player order.
pub fn key_to_action(key: KeyEvent) -> Option<PlayerAction> {
    match key.code {
        // Arrows and vi keys walk
        KeyCode::Up | KeyCode::Char('k') => Some(PlayerAction::Move(Direction::North)),
        KeyCode::Down | KeyCode::Char('j') => Some(PlayerAction::Move(Direction::South)),
        KeyCode::Left | KeyCode::Char('h') => Some(PlayerAction::Move(Direction::West)),
        KeyCode::Right | KeyCode::Char('l') => Some(PlayerAction::Move(Direction::East)),

        KeyCode::Char(' ') => Some(PlayerAction::Wait),
        KeyCode::Char('f') => Some(PlayerAction::CastFireball),
        KeyCode::Char('b') => Some(PlayerAction::BuildWall),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_map_to_moves() {
        assert_eq!(
            key_to_action(key(KeyCode::Up)),
            Some(PlayerAction::Move(Direction::North))
        );
        assert_eq!(
            key_to_action(key(KeyCode::Left)),
            Some(PlayerAction::Move(Direction::West))
        );
    }

    #[test]
    fn test_vi_keys_match_arrows() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('k'))),
            key_to_action(key(KeyCode::Up))
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('l'))),
            key_to_action(key(KeyCode::Right))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char(' '))), Some(PlayerAction::Wait));
        assert_eq!(
            key_to_action(key(KeyCode::Char('f'))),
            Some(PlayerAction::CastFireball)
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('b'))),
            Some(PlayerAction::BuildWall)
        );
    }

    #[test]
    fn test_unbound_keys_do_nothing() {
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), None);
        assert_eq!(key_to_action(key(KeyCode::Tab)), None);
    }
}
