//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`blockfall_types::GameAction`] and
//! provides a DAS/ARR repeat handler for held movement keys, including
//! terminals that never emit key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
