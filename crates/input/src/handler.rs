//! DAS/ARR repeat handler for held movement keys.
//!
//! Terminals often deliver no key-release events, so a held key is modeled as
//! "pressed recently": repeats stop once no press has been seen for the
//! release timeout.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{
    GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

// A single tap must not turn into a sustained hold in terminals without
// key-release events.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Delayed-auto-shift state for one repeatable input axis.
#[derive(Debug, Clone, Copy, Default)]
struct Repeater {
    held: bool,
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeater {
    fn press(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        self.das_timer = 0;
        self.arr_accumulator = 0;
        true
    }

    fn release(&mut self) {
        *self = Self::default();
    }

    /// Advance timers; returns how many repeats fired during `elapsed_ms`.
    fn update(&mut self, elapsed_ms: u32, das: u32, arr: u32) -> u32 {
        if !self.held {
            return 0;
        }

        let prev = self.das_timer;
        self.das_timer += elapsed_ms;
        if self.das_timer < das {
            return 0;
        }

        // Only time past the DAS threshold counts toward ARR.
        let excess = if prev < das {
            self.das_timer - das
        } else {
            elapsed_ms
        };
        self.arr_accumulator += excess;

        let repeats = self.arr_accumulator / arr;
        self.arr_accumulator %= arr;
        repeats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
    None,
}

/// Tracks held movement keys and emits repeat actions each tick.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Horizontal,
    horizontal_repeat: Repeater,
    down_repeat: Repeater,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
    last_key_time: std::time::Instant,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: Horizontal::None,
            horizontal_repeat: Repeater::default(),
            down_repeat: Repeater::default(),
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            last_key_time: std::time::Instant::now(),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Register a key press; returns the immediate action, if any.
    ///
    /// Non-movement keys are not handled here: map them with
    /// [`crate::map::handle_key_event`] and apply them directly.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal != Horizontal::Left {
                    self.horizontal = Horizontal::Left;
                    self.horizontal_repeat.release();
                }
                self.horizontal_repeat
                    .press()
                    .then_some(GameAction::MoveLeft)
            }
            KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal != Horizontal::Right {
                    self.horizontal = Horizontal::Right;
                    self.horizontal_repeat.release();
                }
                self.horizontal_repeat
                    .press()
                    .then_some(GameAction::MoveRight)
            }
            KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => {
                self.last_key_time = std::time::Instant::now();
                self.down_repeat.press().then_some(GameAction::SoftDrop)
            }
            _ => None,
        }
    }

    /// Register a key release (for terminals that do emit them).
    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
                if self.horizontal == Horizontal::Left {
                    self.horizontal = Horizontal::None;
                    self.horizontal_repeat.release();
                }
            }
            KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
                if self.horizontal == Horizontal::Right {
                    self.horizontal = Horizontal::None;
                    self.horizontal_repeat.release();
                }
            }
            KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => {
                self.down_repeat.release();
            }
            _ => {}
        }
    }

    /// Advance repeat timers by `elapsed_ms` and collect repeat actions.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release stale holds when no press has arrived recently.
        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            self.horizontal = Horizontal::None;
            self.horizontal_repeat.release();
            self.down_repeat.release();
        }

        let horizontal_action = match self.horizontal {
            Horizontal::Left => Some(GameAction::MoveLeft),
            Horizontal::Right => Some(GameAction::MoveRight),
            Horizontal::None => None,
        };
        if let Some(action) = horizontal_action {
            let n = self
                .horizontal_repeat
                .update(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..n {
                let _ = actions.try_push(action);
            }
        }

        let n = self
            .down_repeat
            .update(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS);
        for _ in 0..n {
            let _ = actions.try_push(GameAction::SoftDrop);
        }

        actions
    }

    pub fn reset(&mut self) {
        self.horizontal = Horizontal::None;
        self.horizontal_repeat.release();
        self.down_repeat.release();
        self.last_key_time = std::time::Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
