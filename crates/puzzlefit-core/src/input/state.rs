use glam::Vec2;

use crate::input::queue::{InputEvent, PointerButton};

/// Level-triggered view over the event stream: which keys are held,
/// where the pointer is, which buttons are down. The session applies
/// every drained event here so systems can poll between events.
pub struct InputState {
    held_keys: Vec<u32>,
    cursor: Vec2,
    primary_down: bool,
    secondary_down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held_keys: Vec::with_capacity(8),
            cursor: Vec2::ZERO,
            primary_down: false,
            secondary_down: false,
        }
    }

    /// Fold one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                self.cursor = Vec2::new(x, y);
                self.set_button(button, true);
            }
            InputEvent::PointerUp { x, y, button } => {
                self.cursor = Vec2::new(x, y);
                self.set_button(button, false);
            }
            InputEvent::PointerMove { x, y } => {
                self.cursor = Vec2::new(x, y);
            }
            InputEvent::KeyDown { key_code } => {
                // Hosts auto-repeat KeyDown; record each key once
                if !self.held_keys.contains(&key_code) {
                    self.held_keys.push(key_code);
                }
            }
            InputEvent::KeyUp { key_code } => {
                self.held_keys.retain(|&k| k != key_code);
            }
            InputEvent::Ui(_) => {}
        }
    }

    fn set_button(&mut self, button: PointerButton, down: bool) {
        match button {
            PointerButton::Primary => self.primary_down = down,
            PointerButton::Secondary => self.secondary_down = down,
        }
    }

    /// Whether the given key is currently held.
    pub fn is_held(&self, key_code: u32) -> bool {
        self.held_keys.contains(&key_code)
    }

    /// Last known pointer position.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn primary_held(&self) -> bool {
        self.primary_down
    }

    pub fn secondary_held(&self) -> bool {
        self.secondary_down
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
