//! Key state tracking
//!
//! Front ends report press/release transitions for abstract keys. Movement
//! keys are level-triggered (held); reset and quit are one-shot and are
//! cleared once they have been handed to a tick.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Abstract control, independent of any physical key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    P1Up,
    P1Down,
    P2Up,
    P2Down,
    Reset,
    Quit,
}

/// Held-key state plus pending one-shot commands
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    /// Release a movement key. Releasing a one-shot key is a no-op so a quick
    /// tap between two ticks is not lost.
    pub fn release(&mut self, key: Key) {
        match key {
            Key::Reset | Key::Quit => {}
            _ => self.set(key, false),
        }
    }

    fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::P1Up => self.held.p1_up = down,
            Key::P1Down => self.held.p1_down = down,
            Key::P2Up => self.held.p2_up = down,
            Key::P2Down => self.held.p2_down = down,
            Key::Reset => self.held.reset = down,
            Key::Quit => self.held.quit = down,
        }
    }

    /// Input for the next tick; clears one-shot commands
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = self.held;
        self.held.reset = false;
        self.held.quit = false;
        input
    }
}
