/// Input events the overlay understands.
/// Listeners only enqueue these; they are applied at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to surface coordinates (x, y) at `at_ms` (frame clock).
    PointerMove { x: f32, y: f32, at_ms: f64 },
    /// The pointer left the page.
    PointerLeave,
    /// The viewport (and surface backing store) changed size.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// Host listeners write events into the queue; the frame callback drains them.
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

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drop pending events without applying them.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
