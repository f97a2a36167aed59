use crate::input::keys::Action;

/// Key transitions the host reports, already mapped to game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

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
        q.push(InputEvent::Pressed(Action::Left));
        q.push(InputEvent::Released(Action::Left));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::Pressed(Action::Left));
        assert!(q.is_empty());
    }
}
