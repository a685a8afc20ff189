//! Held-key tracking for terminal environments.
//!
//! Lateral moves repeat while a direction key is held; the loop driver asks
//! [`InputState::lateral`] once per movement interval. Left and right are
//! mutually exclusive and the latest press wins. Soft drop is a hold.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use crossterm::event::KeyCode;

use crate::map::command_for_code;
use crate::types::{Command, KEY_RELEASE_TIMEOUT_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn command(self) -> Option<Command> {
        match self {
            HorizontalDirection::Left => Some(Command::MoveLeft),
            HorizontalDirection::Right => Some(Command::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Tracks which keys are held between frames.
#[derive(Debug, Clone)]
pub struct InputState {
    horizontal: HorizontalDirection,
    /// A press not yet turned into a move, so a quick tap still moves once
    pending_tap: Option<Command>,
    soft_drop: bool,
    idle_ms: u32,
    key_release_timeout_ms: u32,
    release_events_seen: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            pending_tap: None,
            soft_drop: false,
            idle_ms: 0,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop
    }

    /// Record a key press. Returns the command to apply right away, if any.
    ///
    /// Lateral presses only update the held direction; the move itself comes
    /// from [`InputState::lateral`].
    pub fn press(&mut self, command: Command) -> Option<Command> {
        self.idle_ms = 0;
        match command {
            Command::MoveLeft => {
                self.hold_direction(HorizontalDirection::Left);
                None
            }
            Command::MoveRight => {
                self.hold_direction(HorizontalDirection::Right);
                None
            }
            Command::SoftDropOn => {
                if self.soft_drop {
                    None
                } else {
                    self.soft_drop = true;
                    Some(Command::SoftDropOn)
                }
            }
            Command::SoftDropOff => self.end_soft_drop(),
            Command::RotateRight | Command::RotateLeft | Command::HardDrop => Some(command),
        }
    }

    fn hold_direction(&mut self, direction: HorizontalDirection) {
        if self.horizontal != direction {
            self.horizontal = direction;
            self.pending_tap = direction.command();
        }
    }

    /// Record an auto-repeat of a held key. Keeps it held; never a command.
    pub fn repeat(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.hold_direction(HorizontalDirection::Left),
            Command::MoveRight => self.hold_direction(HorizontalDirection::Right),
            _ => {}
        }
        self.idle_ms = 0;
    }

    /// Record a key release. Returns [`Command::SoftDropOff`] when the soft
    /// drop hold ends.
    pub fn release(&mut self, command: Command) -> Option<Command> {
        self.release_events_seen = true;
        match command {
            Command::MoveLeft if self.horizontal == HorizontalDirection::Left => {
                self.horizontal = HorizontalDirection::None;
                None
            }
            Command::MoveRight if self.horizontal == HorizontalDirection::Right => {
                self.horizontal = HorizontalDirection::None;
                None
            }
            Command::SoftDropOn | Command::SoftDropOff => self.end_soft_drop(),
            _ => None,
        }
    }

    fn end_soft_drop(&mut self) -> Option<Command> {
        if self.soft_drop {
            self.soft_drop = false;
            Some(Command::SoftDropOff)
        } else {
            None
        }
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        command_for_code(code).and_then(|command| self.press(command))
    }

    pub fn handle_key_repeat(&mut self, code: KeyCode) {
        if let Some(command) = command_for_code(code) {
            self.repeat(command);
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<Command> {
        command_for_code(code).and_then(|command| self.release(command))
    }

    /// Advance the release timeout.
    ///
    /// Once the terminal has delivered a real release event the timeout is
    /// disabled. Returns [`Command::SoftDropOff`] when a held soft drop times out.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<Command> {
        if self.release_events_seen {
            return None;
        }
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms <= self.key_release_timeout_ms {
            return None;
        }
        self.horizontal = HorizontalDirection::None;
        self.end_soft_drop()
    }

    /// The lateral move due this movement interval, if any
    pub fn lateral(&mut self) -> Option<Command> {
        let tap = self.pending_tap.take();
        self.horizontal.command().or(tap)
    }

    /// Forget every held key (new game)
    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.pending_tap = None;
        self.soft_drop = false;
        self.idle_ms = 0;
    }
}
