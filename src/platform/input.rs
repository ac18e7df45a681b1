//! Keyboard latch
//!
//! Tracks which bound keys are held and raises a one-shot start edge when a
//! jump key goes down. Last state wins: nothing is queued between steps.

use crate::settings::KeyBindings;
use crate::sim::TickInput;

#[derive(Debug, Clone)]
pub struct InputLatch {
    bindings: KeyBindings,
    /// Bound key codes currently held
    held: Vec<String>,
    /// Start/restart requested since the last sample
    start: bool,
    /// A finger is down (acts as a jump key)
    touching: bool,
    /// Demo player toggle
    pub autopilot: bool,
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputLatch {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: Vec::new(),
            start: false,
            touching: false,
            autopilot: false,
        }
    }

    /// Handle a key press. Returns true if the key is bound (host should
    /// suppress the browser default, e.g. page scroll on Space).
    pub fn key_down(&mut self, code: &str, repeat: bool) -> bool {
        if self.bindings.toggles_autopilot(code) {
            if !repeat {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            return true;
        }

        let jump = self.bindings.is_jump(code);
        if !jump && !self.bindings.is_crouch(code) {
            return false;
        }

        if !self.held.iter().any(|k| k == code) {
            self.held.push(code.to_string());
        }
        if jump && !repeat {
            self.start = true;
        }
        true
    }

    /// Handle a key release
    pub fn key_up(&mut self, code: &str) {
        self.held.retain(|k| k != code);
    }

    /// Tap: same as pressing a jump key
    pub fn touch_start(&mut self) {
        if !self.touching {
            self.start = true;
        }
        self.touching = true;
    }

    pub fn touch_end(&mut self) {
        self.touching = false;
    }

    /// Drop all held keys (window blur: key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.touching = false;
    }

    pub fn jump_held(&self) -> bool {
        self.touching || self.held.iter().any(|k| self.bindings.is_jump(k))
    }

    pub fn crouch_held(&self) -> bool {
        self.held.iter().any(|k| self.bindings.is_crouch(k))
    }

    /// Read the input for the next step and consume the start edge
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            jump: self.jump_held(),
            crouch: self.crouch_held(),
            start: self.start,
        };
        self.start = false;
        input
    }
}
