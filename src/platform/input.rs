//! Keyboard input mapping
//!
//! Turn with J/L, strafe with A/D, walk with W/S, Tab toggles the overhead
//! map. Each pair of keys collapses into one axis.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{Axis, TickInput};

/// Keys the demo reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    J,
    L,
    Tab,
    Escape,
}

impl Key {
    /// Parse a key name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "j" => Some(Key::J),
            "l" => Some(Key::L),
            "tab" => Some(Key::Tab),
            "esc" | "escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Snapshot of which keys are held
pub trait KeyboardState {
    fn is_down(&self, key: Key) -> bool;
}

impl KeyboardState for HashSet<Key> {
    fn is_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl KeyboardState for [Key] {
    fn is_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl TickInput {
    /// Sample the frame's input from held keys
    pub fn from_keyboard<K: KeyboardState + ?Sized>(keys: &K) -> Self {
        Self {
            turn: Axis::from_keys(keys.is_down(Key::J), keys.is_down(Key::L)),
            strafe: Axis::from_keys(keys.is_down(Key::D), keys.is_down(Key::A)),
            forward: Axis::from_keys(keys.is_down(Key::W), keys.is_down(Key::S)),
            debug_key: keys.is_down(Key::Tab),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pairs_map_to_axes() {
        let keys: HashSet<Key> = [Key::J, Key::W, Key::A].into_iter().collect();
        let input = TickInput::from_keyboard(&keys);
        assert_eq!(input.turn, Axis::Positive);
        assert_eq!(input.forward, Axis::Positive);
        assert_eq!(input.strafe, Axis::Negative);
        assert!(!input.debug_key);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let keys = [Key::J, Key::L, Key::W, Key::S, Key::Tab];
        let input = TickInput::from_keyboard(&keys[..]);
        assert_eq!(input.turn, Axis::Neutral);
        assert_eq!(input.forward, Axis::Neutral);
        assert!(input.debug_key);
    }

    #[test]
    fn test_no_keys_is_default_input() {
        let keys: HashSet<Key> = HashSet::new();
        assert_eq!(TickInput::from_keyboard(&keys), TickInput::default());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("W"), Some(Key::W));
        assert_eq!(Key::from_name("tab"), Some(Key::Tab));
        assert_eq!(Key::from_name("Esc"), Some(Key::Escape));
        assert_eq!(Key::from_name("q"), None);
    }
}
