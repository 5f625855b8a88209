//! Pieces module - shape catalog with simplified per-kind rotations.
//!
//! Each kind has a hand-authored cyclic sequence of rotation states rather
//! than a full rotation system: I, S and Z alternate between two states,
//! O has a single state, and T, J and L cycle through four. There are no
//! kick attempts; a rotation that does not fit is rejected as-is.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Offset of a single cell relative to the shape grid's top-left corner
pub type CellOffset = (i8, i8);

/// One rotation state - 4 cell offsets
pub type PieceShape = [CellOffset; 4];

/// I rotations (4x4 grid)
const I_SHAPES: [PieceShape; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

/// O rotation (2x2 grid, never changes)
const O_SHAPES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

/// T rotations (3x3 grid)
const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

/// S rotations (3x3 grid)
const S_SHAPES: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

/// Z rotations (3x3 grid)
const Z_SHAPES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

/// J rotations (3x3 grid)
const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

/// L rotations (3x3 grid)
const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// Get the ordered rotation sequence for a piece kind
pub fn rotations(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Number of rotation states for a kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotations(kind).len() as u8
}

/// Get the shape for a kind at a rotation index (wraps modulo count)
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let states = rotations(kind);
    states[(rotation as usize) % states.len()]
}

/// Next rotation index in the cyclic sequence
pub fn next_rotation(kind: PieceKind, rotation: u8) -> u8 {
    (rotation + 1) % rotation_count(kind)
}

/// Width of the shape's bounding grid (same for every rotation of a kind)
pub fn grid_width(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        _ => 3,
    }
}

/// Spawn column: shape grid horizontally centered on the board
pub fn spawn_x(kind: PieceKind) -> i8 {
    let w = grid_width(kind) as i8;
    (BOARD_WIDTH as i8) / 2 - (w + 1) / 2
}
