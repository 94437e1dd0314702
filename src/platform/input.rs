//! Keyboard input collection
//!
//! Browser key events arrive between frames. Held keys are tracked as
//! levels; start and the two toggles are latched as pulses that survive
//! until the next tick consumes them.

use crate::sim::TickInput;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Start,
    ToggleMute,
    ToggleInvulnerable,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(KeyAction::Up),
            "ArrowDown" | "s" | "S" => Some(KeyAction::Down),
            "ArrowLeft" | "a" | "A" => Some(KeyAction::Left),
            "ArrowRight" | "d" | "D" => Some(KeyAction::Right),
            " " | "Spacebar" => Some(KeyAction::Start),
            "m" | "M" => Some(KeyAction::ToggleMute),
            "g" | "G" => Some(KeyAction::ToggleInvulnerable),
            _ => None,
        }
    }

    /// Keys the page should not also scroll with
    pub fn prevents_default(self) -> bool {
        !matches!(self, KeyAction::ToggleMute | KeyAction::ToggleInvulnerable)
    }
}

/// Accumulated keyboard state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pending: TickInput,
}

impl InputState {
    pub fn key_down(&mut self, action: KeyAction, repeat: bool) {
        match action {
            KeyAction::Up => self.pending.up = true,
            KeyAction::Down => self.pending.down = true,
            KeyAction::Left => self.pending.left = true,
            KeyAction::Right => self.pending.right = true,
            // Auto-repeat must not flip a toggle back and forth
            _ if repeat => {}
            KeyAction::Start => self.pending.start = true,
            KeyAction::ToggleMute => self.pending.toggle_mute = true,
            KeyAction::ToggleInvulnerable => self.pending.toggle_invulnerable = true,
        }
    }

    pub fn key_up(&mut self, action: KeyAction) {
        match action {
            KeyAction::Up => self.pending.up = false,
            KeyAction::Down => self.pending.down = false,
            KeyAction::Left => self.pending.left = false,
            KeyAction::Right => self.pending.right = false,
            _ => {}
        }
    }

    /// Release everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.pending = TickInput::default();
    }

    /// Input for the next tick. Pulses are cleared; held keys stay held.
    pub fn take(&mut self) -> TickInput {
        let input = self.pending.clone();
        self.pending.start = false;
        self.pending.toggle_mute = false;
        self.pending.toggle_invulnerable = false;
        input
    }
}
