//! Held-key tracker for terminal environments.
//!
//! The session wants horizontal moves every frame while a key is held and an
//! explicit signal when no horizontal key is held any more. Terminals that do
//! not emit key release events are covered by a timeout: a key with no fresh
//! press or repeat within the timeout counts as released.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{map_key_code, Control};
use crate::types::Intent;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks which movement keys are held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    /// Horizontal key released since the last update
    release_pending: bool,
    /// Down released by the timeout since the last update
    soft_drop_end_pending: bool,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

// Operating systems usually wait 250-500ms before auto-repeating a held key,
// so a timeout below that would drop the hold before the first repeat.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 550;

impl InputHandler {
    pub fn new() -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            release_pending: false,
            soft_drop_end_pending: false,
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Handle a key press (or an auto-repeat of one)
    ///
    /// Returns the intent to apply right away, if any. Horizontal presses
    /// return a move only when the direction changes; holding is reported by
    /// [`InputHandler::update`].
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Intent> {
        match map_key_code(code)? {
            Control::Left => self.press_horizontal(HorizontalDirection::Left),
            Control::Right => self.press_horizontal(HorizontalDirection::Right),
            Control::Down => {
                self.last_key_time = Instant::now();
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.soft_drop_end_pending = false;
                    Some(Intent::SoftDropStart)
                }
            }
            Control::Rotate => Some(Intent::RotateCw),
            Control::HardDrop => Some(Intent::HardDrop),
            Control::Pause => Some(Intent::TogglePause),
        }
    }

    fn press_horizontal(&mut self, dir: HorizontalDirection) -> Option<Intent> {
        self.last_key_time = Instant::now();
        if self.horizontal == dir {
            return None;
        }
        self.horizontal = dir;
        self.release_pending = false;
        match dir {
            HorizontalDirection::Left => Some(Intent::MoveLeft),
            HorizontalDirection::Right => Some(Intent::MoveRight),
            HorizontalDirection::None => None,
        }
    }

    /// Handle a key release. Returns the intent to apply right away, if any.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<Intent> {
        match map_key_code(code)? {
            Control::Left => {
                self.release_horizontal(HorizontalDirection::Left);
                None
            }
            Control::Right => {
                self.release_horizontal(HorizontalDirection::Right);
                None
            }
            Control::Down => {
                if self.down_held {
                    self.down_held = false;
                    Some(Intent::SoftDropEnd)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn release_horizontal(&mut self, dir: HorizontalDirection) {
        if self.horizontal == dir {
            self.horizontal = HorizontalDirection::None;
            self.release_pending = true;
        }
    }

    /// Per-frame intents for the held keys
    pub fn update(&mut self) -> ArrayVec<Intent, 4> {
        let mut intents = ArrayVec::<Intent, 4>::new();

        // Auto-release when terminal does not emit release events.
        let since_last_key = self.last_key_time.elapsed().as_millis();
        if since_last_key > self.key_release_timeout_ms as u128 {
            if self.horizontal != HorizontalDirection::None {
                self.horizontal = HorizontalDirection::None;
                self.release_pending = true;
            }
            if self.down_held {
                self.down_held = false;
                self.soft_drop_end_pending = true;
            }
        }

        if self.soft_drop_end_pending {
            self.soft_drop_end_pending = false;
            intents.push(Intent::SoftDropEnd);
        }

        if self.release_pending {
            self.release_pending = false;
            intents.push(Intent::ReleaseHorizontal);
        }

        match self.horizontal {
            HorizontalDirection::Left => intents.push(Intent::MoveLeft),
            HorizontalDirection::Right => intents.push(Intent::MoveRight),
            HorizontalDirection::None => {}
        }

        intents
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.release_pending = false;
        self.soft_drop_end_pending = false;
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
