use crate::control::state::{ControlMessage, ControlState};

/// A queue of control messages.
/// The UI pushes messages as they happen; the runner drains them into
/// `ControlState` once per frame, before ticking.
pub struct ControlQueue {
    messages: Vec<ControlMessage>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            messages: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, message: ControlMessage) {
        self.messages.push(message);
    }

    /// Drain all pending messages. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<ControlMessage> {
        std::mem::take(&mut self.messages)
    }

    /// Apply every pending message to `state` in arrival order, then clear.
    pub fn apply_to(&mut self, state: &mut ControlState) {
        for message in self.messages.drain(..) {
            state.apply(message);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlMessage> {
        self.messages.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}
