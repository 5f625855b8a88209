//! Core game logic - pure, deterministic, and testable.
//!
//! This crate contains all the game rules and state management with zero
//! dependencies on UI or I/O:
//!
//! - [`board`]: 10x20 settled-cell grid with line clearing
//! - [`pieces`]: shape catalog with simplified per-kind rotation sequences
//! - [`rng`]: seedable LCG for reproducible piece draws
//! - [`scoring`]: line-clear points and level/speed progression
//! - [`game_state`]: the engine controller owning all mutable state
//! - [`snapshot`]: read-only state views for rendering
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.status(), GameStatus::Running);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//! ```
//!
//! # Timing
//!
//! Gravity is driven externally: call [`GameState::tick`] with elapsed
//! milliseconds (the binary uses a fixed 16 ms cadence). The interval between
//! gravity steps shrinks as the level rises; see [`scoring::drop_interval_ms`].

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use game_state::{ActivePiece, GameState};
pub use pieces::{get_shape, next_rotation, rotation_count, rotations, spawn_x};
pub use rng::SimpleRng;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
