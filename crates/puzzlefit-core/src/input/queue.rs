/// Which pointer button an event refers to.
/// Primary drags pieces; secondary orbits the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// UI button presses forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Start,
    Restart,
    NewGame,
}

/// Input event types the session understands.
/// Generic, with no host-specific semantics beyond key codes.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A pointer button went down at screen coordinates (x, y).
    PointerDown { x: f32, y: f32, button: PointerButton },
    /// A pointer button went up at screen coordinates (x, y).
    PointerUp { x: f32, y: f32, button: PointerButton },
    /// The pointer moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A UI button event from the host overlay.
    Ui(UiEvent),
}

/// A queue of input events.
/// The host writes events into the queue; the session drains them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown {
            x: 10.0,
            y: 20.0,
            button: PointerButton::Primary,
        });
        q.push(InputEvent::KeyDown { key_code: 88 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn ui_event_round_trips() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Ui(UiEvent::Restart));
        let events = q.drain();
        assert_eq!(events.len(), 1);
        match events[0] {
            InputEvent::Ui(ui) => assert_eq!(ui, UiEvent::Restart),
            _ => panic!("Expected Ui event"),
        }
    }
}
