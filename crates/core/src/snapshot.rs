//! Read-only state snapshots consumed by rendering and tests.

use crate::game_state::ActivePiece;
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Full observable state after a mutating call.
///
/// Board cells are kind markers (0 = empty, see `PieceKind::cell_marker`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub status: GameStatus,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.status = GameStatus::Ready;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = 0;
        self.seed = 0;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            status: GameStatus::Ready,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            seed: 0,
        };
        s.clear();
        s
    }
}
