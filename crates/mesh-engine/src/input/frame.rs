use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton};

/// Input collected since the previous frame.
///
/// Events keep arrival order; a press and its release in the same frame are
/// both present, which matters for click-and-release inside one redraw.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    pub keys_pressed: HashSet<Key>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
