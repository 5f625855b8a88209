//! Terminal frontend: framebuffer, game view, and renderer.
//!
//! The view layer is split so that everything except the final flush to
//! stdout stays pure and testable:
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot -> framebuffer mapping
//! - [`renderer`]: raw-mode terminal setup and frame flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
