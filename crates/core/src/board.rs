//! Board module - the settled-cell grid.
//!
//! A 10x20 grid stored as a flat array (row-major) for cache locality and
//! zero-allocation line clears. Coordinates are (x, y) with x in 0..10 left
//! to right and y in 0..20 top to bottom. Falling pieces may extend above the
//! top edge (negative y); those cells are not stored and are treated as open
//! space as long as they stay within the horizontal bounds.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The game board - 10 columns x 20 rows of settled cells
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (x, y); `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y); returns false when out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether a falling piece's cell may occupy (x, y).
    ///
    /// False when x is outside the side walls or y is at/below the floor.
    /// True above the top edge (y < 0): the piece is still entering the
    /// board, so only the horizontal bounds apply there. Otherwise true iff
    /// the cell holds no settled piece.
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        self.cells[(y as usize) * (BOARD_WIDTH as usize) + (x as usize)].is_none()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows, shifting everything above each cleared row down
    /// by one and inserting empty rows at the top.
    ///
    /// Scans bottom to top with a read/write pointer pair so a row that
    /// receives shifted-down content is re-examined, which makes
    /// non-contiguous multi-row clears work in a single pass.
    /// Returns the cleared row indices, bottom to top (at most 4 per lock).
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                let _ = cleared_rows.try_push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Rows left at the top become the inserted empty rows.
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Write a piece's cells into the board.
    ///
    /// Cells above the top edge (absolute y < 0) are skipped: a piece locked
    /// while still partially entering leaves only its visible cells behind.
    pub fn write_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8, kind: PieceKind) {
        for &(dx, dy) in shape {
            let py = y + dy;
            if py >= 0 {
                self.set(x + dx, py, Some(kind));
            }
        }
    }

    /// Count settled cells (test/diagnostic helper)
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Snapshot the grid as 0/kind-marker bytes
    pub fn write_marker_grid(
        &self,
        out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    ) {
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                out[y][x] = self.cells[y * BOARD_WIDTH as usize + x]
                    .map_or(0, PieceKind::cell_marker);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
