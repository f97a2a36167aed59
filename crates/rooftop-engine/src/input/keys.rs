//! Held-key state and the key-code to action table.

use serde::{Deserialize, Serialize};

use crate::input::queue::InputEvent;

/// Everything the player controller reads in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack_front: bool,
    pub attack_back: bool,
}

/// A bindable game action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    AttackFront,
    AttackBack,
}

/// Host key codes (DOM `KeyboardEvent.code` strings) per action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
    pub attack_front: Vec<String>,
    pub attack_back: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn codes(list: &[&str]) -> Vec<String> {
            list.iter().map(|c| c.to_string()).collect()
        }
        Self {
            left: codes(&["ArrowLeft", "KeyA"]),
            right: codes(&["ArrowRight", "KeyD"]),
            jump: codes(&["ArrowUp", "Space", "KeyW"]),
            attack_front: codes(&["ControlLeft", "KeyJ"]),
            attack_back: codes(&["ControlRight", "KeyK"]),
        }
    }
}

impl KeyBindings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Action bound to `code`, if any. First match in declaration order wins.
    pub fn action_for(&self, code: &str) -> Option<Action> {
        [
            (Action::Left, &self.left),
            (Action::Right, &self.right),
            (Action::Jump, &self.jump),
            (Action::AttackFront, &self.attack_front),
            (Action::AttackBack, &self.attack_back),
        ]
        .into_iter()
        .find(|(_, codes)| codes.iter().any(|c| c == code))
        .map(|(action, _)| action)
    }

    pub fn press(&self, code: &str) -> Option<InputEvent> {
        self.action_for(code).map(InputEvent::Pressed)
    }

    pub fn release(&self, code: &str) -> Option<InputEvent> {
        self.action_for(code).map(InputEvent::Released)
    }
}

/// Currently held actions, folded from press/release events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    held: InputSnapshot,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        let (action, down) = match event {
            InputEvent::Pressed(a) => (a, true),
            InputEvent::Released(a) => (a, false),
        };
        let slot = match action {
            Action::Left => &mut self.held.left,
            Action::Right => &mut self.held.right,
            Action::Jump => &mut self.held.jump,
            Action::AttackFront => &mut self.held.attack_front,
            Action::AttackBack => &mut self.held.attack_back,
        };
        *slot = down;
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.held
    }

    /// Release everything (e.g. when the page loses focus).
    pub fn clear(&mut self) {
        self.held = InputSnapshot::default();
    }
}
