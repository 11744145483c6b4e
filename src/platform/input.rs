//! Keyboard snapshot and key bindings

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{PaddleDirection, TickInput};

/// Keys the game can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    W,
    S,
    ArrowUp,
    ArrowDown,
}

/// Set of keys held at the moment of the snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pressed: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Drop every held key (focus loss)
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

impl FromIterator<Key> for KeyboardState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            pressed: iter.into_iter().collect(),
        }
    }
}

/// What one keyboard snapshot asks for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameIntent {
    pub tick: TickInput,
    pub quit: bool,
}

/// Which keys mean up, down and quit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBindings {
    pub up: Key,
    pub down: Key,
    pub quit: Key,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            up: Key::W,
            down: Key::S,
            quit: Key::Escape,
        }
    }
}

impl InputBindings {
    /// Translate a snapshot into this frame's intent
    pub fn read(&self, keyboard: &KeyboardState) -> FrameIntent {
        let paddle_direction =
            PaddleDirection::from_keys(keyboard.is_pressed(self.up), keyboard.is_pressed(self.down));
        FrameIntent {
            tick: TickInput { paddle_direction },
            quit: keyboard.is_pressed(self.quit),
        }
    }
}
