//! Core types shared across the workspace.
//! This crate contains pure data types and constants with no dependencies.

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed event-loop cadence (milliseconds)
pub const TICK_MS: u32 = 16;

/// Gravity timing (milliseconds)
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_STEP_PER_LEVEL_MS: u32 = 75;
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring, indexed by rows cleared in one lock event
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// DAS/ARR timing for held keys (milliseconds)
pub const DEFAULT_DAS_MS: u32 = 150;
pub const DEFAULT_ARR_MS: u32 = 50;
pub const SOFT_DROP_DAS_MS: u32 = 0;
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// All kinds, in spawn-index order.
pub const PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::O,
    PieceKind::T,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::J,
    PieceKind::L,
];

impl PieceKind {
    /// Kind for a random draw in `0..7`.
    pub fn from_index(index: u32) -> Self {
        PIECE_KINDS[(index % 7) as usize]
    }

    /// 1-based cell marker stored in board snapshots (0 = empty).
    pub fn cell_marker(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    pub fn from_cell_marker(v: u8) -> Option<Self> {
        match v {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Lifecycle of a single game run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// Created, waiting for the first `start()`.
    #[default]
    Ready,
    Running,
    /// A freshly spawned piece could not be placed.
    GameOver,
}

impl GameStatus {
    pub fn is_running(self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// Commands accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    /// Single-step down.
    SoftDrop,
    HardDrop,
    Rotate,
    /// Reset everything and begin a new run.
    Start,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Start => "start",
        }
    }
}

/// Cell on the board (None = empty, Some = settled piece kind)
pub type Cell = Option<PieceKind>;
