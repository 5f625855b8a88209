//! Game state module - the engine controller.
//!
//! `GameState` owns the board, the active piece, the RNG and the progression
//! counters exclusively. All mutations run to completion before the next
//! command is processed; collaborators only read snapshots.
//!
//! Gravity is an elapsed-time accumulator driven by an external clock
//! (`tick`), so tests inject simulated time instead of real timers. There is
//! no lock delay: a piece locks on the first gravity step that fails.

use crate::board::Board;
use crate::pieces::{get_shape, next_rotation, spawn_x, PieceShape};
use crate::rng::SimpleRng;
use crate::scoring;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameStatus, PieceKind, BASE_DROP_MS};

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Index into the kind's rotation sequence (wraps modulo its length)
    pub rotation: u8,
    /// Board column of the shape grid's top-left corner
    pub x: i8,
    /// Board row of the shape grid's top-left corner (may go negative)
    pub y: i8,
}

impl ActivePiece {
    /// New piece at its spawn position: rotation 0, horizontally centered,
    /// top row 0.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: spawn_x(kind),
            y: 0,
        }
    }

    /// Cell offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Check that every cell of this piece may occupy its board position
    pub fn fits(&self, board: &Board) -> bool {
        self.shape()
            .iter()
            .all(|&(dx, dy)| board.is_open(self.x + dx, self.y + dy))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    rng: SimpleRng,
    status: GameStatus,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Elapsed time accumulated toward the next gravity step
    drop_timer_ms: u32,
}

impl GameState {
    /// Create a new game in the `Ready` state with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            rng: SimpleRng::new(seed),
            status: GameStatus::Ready,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
            drop_timer_ms: 0,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reset everything and begin a new run.
    ///
    /// Valid from any status, including `GameOver` (play again) and
    /// `Running` (restart). The RNG continues from its current state so
    /// restarts do not replay the previous piece sequence.
    pub fn start(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.drop_timer_ms = 0;
        self.status = GameStatus::Running;
        self.spawn_piece();
    }

    /// Spawn the next piece at the top of the board.
    ///
    /// This is the sole game-over trigger: when the freshly drawn piece does
    /// not fit at its spawn position, the run ends and the board is left
    /// untouched.
    fn spawn_piece(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.rng.next_piece());

        if !piece.fits(&self.board) {
            self.status = GameStatus::GameOver;
            self.active = None;
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Try to move the active piece by (dx, dy).
    ///
    /// Commits and returns true when the new position fits; otherwise leaves
    /// the state unchanged. Always false when the game is not running.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.status.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        };

        if moved.fits(&self.board) {
            self.active = Some(moved);
            return true;
        }

        false
    }

    /// Try to advance the active piece to its next rotation state.
    ///
    /// The origin stays fixed and there are no kick attempts: when the
    /// rotated shape does not fit, the rotation is silently rejected.
    pub fn try_rotate(&mut self) -> bool {
        if !self.status.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            rotation: next_rotation(active.kind, active.rotation),
            ..active
        };

        if rotated.fits(&self.board) {
            self.active = Some(rotated);
            return true;
        }

        false
    }

    /// Drop the active piece straight to the floor and lock it
    pub fn hard_drop(&mut self) -> bool {
        if !self.status.is_running() || self.active.is_none() {
            return false;
        }

        while self.try_move(0, 1) {}
        self.lock_piece();
        true
    }

    /// Lock the active piece into the board, clear full rows, apply
    /// progression, and spawn the next piece.
    ///
    /// Atomic from the caller's perspective: no intermediate state is
    /// observable between these steps.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .write_piece(&active.shape(), active.x, active.y, active.kind);

        let cleared = self.board.clear_full_rows().len();
        if cleared > 0 {
            self.apply_clear(cleared);
        }

        self.spawn_piece();
    }

    /// Progression policy: score with the pre-event level, then re-derive
    /// level and gravity interval from the new line total.
    fn apply_clear(&mut self, cleared: usize) {
        self.score += scoring::score_for_clear(cleared, self.level);
        self.lines += cleared as u32;

        let new_level = scoring::level_for_lines(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.drop_interval_ms = scoring::drop_interval_ms(new_level);
            // Equivalent of rescheduling the gravity timer at the new rate.
            self.drop_timer_ms = 0;
        }
    }

    /// Advance the gravity clock by `elapsed_ms`.
    ///
    /// When a full drop interval has accumulated, the piece steps down once;
    /// if it cannot, it locks in place (which may end the game through the
    /// following spawn). Returns true when a gravity step or lock happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.status.is_running() {
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms < self.drop_interval_ms {
            return false;
        }
        self.drop_timer_ms = 0;

        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Apply a game command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Start => {
                self.start();
                true
            }
        }
    }

    /// Fill an existing snapshot (allocation-free render path)
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_marker_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.status = self.status;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.seed = self.rng.state();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::rotation_count;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    /// Running state with a chosen active piece and no randomness in the way.
    fn running_with(kind: PieceKind) -> GameState {
        let mut state = GameState::new(1);
        state.status = GameStatus::Running;
        state.active = Some(ActivePiece::spawn(kind));
        state
    }

    fn fill_row_except(state: &mut GameState, y: i8, open_x: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            if x != open_x {
                state.board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_is_ready() {
        let state = GameState::new(12345);
        assert_eq!(state.status(), GameStatus::Ready);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert!(state.active().is_none());
    }

    #[test]
    fn test_start_spawns_first_piece() {
        let mut state = GameState::new(12345);
        state.start();

        assert_eq!(state.status(), GameStatus::Running);
        let active = state.active().unwrap();
        assert_eq!(active.rotation, 0);
        assert_eq!(active.y, 0);
        assert_eq!(active.x, spawn_x(active.kind));
    }

    #[test]
    fn test_commands_are_noops_before_start() {
        let mut state = GameState::new(12345);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::Rotate));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.tick(10_000));
        assert_eq!(state.status(), GameStatus::Ready);
    }

    #[test]
    fn test_try_move_commits_or_leaves_unchanged() {
        let mut state = running_with(PieceKind::T);
        let x0 = state.active().unwrap().x;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active().unwrap().x, x0 + 1);

        assert!(state.try_move(-1, 0));
        assert_eq!(state.active().unwrap().x, x0);

        // Upward is blocked only by the walls, not the top edge.
        assert!(state.try_move(0, -1));
        assert_eq!(state.active().unwrap().y, -1);
    }

    #[test]
    fn test_move_rejected_at_walls() {
        let mut state = running_with(PieceKind::O);

        let mut lefts = 0;
        while state.try_move(-1, 0) {
            lefts += 1;
            assert!(lefts <= BOARD_WIDTH, "ran past the left wall");
        }
        // O occupies its full 2-wide grid; leftmost cell reaches column 0.
        let active = state.active().unwrap();
        assert_eq!(active.x, 0);
        assert!(!state.try_move(-1, 0));
        assert_eq!(state.active().unwrap(), active);
    }

    #[test]
    fn test_moved_piece_never_overlaps_settled_cells() {
        let mut state = running_with(PieceKind::L);
        for x in 0..BOARD_WIDTH as i8 {
            state.board.set(x, 5, Some(PieceKind::I));
        }

        // Drop as far as it goes; every committed position must be open.
        while state.try_move(0, 1) {
            let active = state.active().unwrap();
            for (dx, dy) in active.shape() {
                let (px, py) = (active.x + dx, active.y + dy);
                if py >= 0 {
                    assert_eq!(state.board.get(px, py), Some(None));
                }
            }
        }
        // Stopped on top of the filled row.
        let bottom = state
            .active()
            .unwrap()
            .shape()
            .iter()
            .map(|&(_, dy)| state.active().unwrap().y + dy)
            .max()
            .unwrap();
        assert_eq!(bottom, 4);
    }

    #[test]
    fn test_rotation_full_cycle_restores_index() {
        for kind in crate::types::PIECE_KINDS {
            let mut state = running_with(kind);
            // Room to rotate freely in mid-air.
            state.active.as_mut().unwrap().y = 8;

            let n = rotation_count(kind);
            for _ in 0..n {
                assert!(state.try_rotate(), "{:?} rotation rejected mid-air", kind);
            }
            assert_eq!(state.active().unwrap().rotation, 0);
        }
    }

    #[test]
    fn test_rotation_rejected_without_kick() {
        // Vertical I against the left wall: rotating to horizontal would
        // poke through the wall, so the rotation is refused outright.
        let mut state = running_with(PieceKind::I);
        state.active = Some(ActivePiece {
            kind: PieceKind::I,
            rotation: 1,
            x: -1, // vertical bar's cells sit in column 0
            y: 5,
        });
        assert!(state.active().unwrap().fits(&state.board));

        assert!(!state.try_rotate());
        assert_eq!(state.active().unwrap().rotation, 1);
        assert_eq!(state.active().unwrap().x, -1);
    }

    #[test]
    fn test_hard_drop_o_piece_lands_at_bottom() {
        let mut state = running_with(PieceKind::O);
        assert_eq!(state.active().unwrap().x, 4);

        assert!(state.hard_drop());

        // O cells settled in the bottom two rows, columns 4..6.
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(state.board.get(x, y), Some(Some(PieceKind::O)));
        }
        assert_eq!(state.board.occupied_count(), 4);

        // And the next piece has spawned at the top.
        let next = state.active().unwrap();
        assert_eq!(next.y, 0);
        assert_eq!(next.rotation, 0);
    }

    #[test]
    fn test_hard_drop_matches_manual_soft_drop_and_lock() {
        let mut a = GameState::new(777);
        a.start();
        let mut b = a.clone();

        a.hard_drop();

        // Soft-drop to the floor, then let a gravity step perform the lock.
        while b.try_move(0, 1) {}
        b.tick(b.drop_interval_ms());

        assert_eq!(a.snapshot().board, b.snapshot().board);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.active(), b.active());
    }

    #[test]
    fn test_lock_clears_single_row_and_scores() {
        let mut state = running_with(PieceKind::I);
        fill_row_except(&mut state, 19, 4);

        // Vertical I over the open column.
        state.active = Some(ActivePiece {
            kind: PieceKind::I,
            rotation: 1,
            x: 3,
            y: 0,
        });

        state.hard_drop();

        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 100);
        assert_eq!(state.level(), 1);
        // Three I cells remain above the cleared row, shifted down one.
        for y in 17..20 {
            assert_eq!(state.board.get(4, y), Some(Some(PieceKind::I)));
        }
        assert_eq!(state.board.occupied_count(), 3);
    }

    #[test]
    fn test_quad_clear_scores_800_at_level_1() {
        let mut state = running_with(PieceKind::I);
        for y in 16..20 {
            fill_row_except(&mut state, y, 4);
        }
        state.active = Some(ActivePiece {
            kind: PieceKind::I,
            rotation: 1,
            x: 3,
            y: 0,
        });

        state.hard_drop();

        assert_eq!(state.lines(), 4);
        assert_eq!(state.score(), 800);
        assert_eq!(state.board.occupied_count(), 0);
    }

    #[test]
    fn test_clear_scores_with_pre_event_level() {
        // 20 lines already cleared puts us at level 3; a double is worth
        // 300 x 3 because the level from before the event applies.
        let mut state = running_with(PieceKind::O);
        state.lines = 20;
        state.level = 3;
        state.drop_interval_ms = scoring::drop_interval_ms(3);

        for y in 18..20 {
            fill_row_except(&mut state, y, 4);
            state.board.set(5, y, None);
        }
        state.active = Some(ActivePiece::spawn(PieceKind::O));

        state.hard_drop();

        assert_eq!(state.score(), 900);
        assert_eq!(state.lines(), 22);
        assert_eq!(state.level(), 3);
    }

    #[test]
    fn test_level_up_shrinks_drop_interval() {
        let mut state = running_with(PieceKind::I);
        state.lines = 9;

        fill_row_except(&mut state, 19, 4);
        state.active = Some(ActivePiece {
            kind: PieceKind::I,
            rotation: 1,
            x: 3,
            y: 0,
        });
        state.drop_timer_ms = 500;

        state.hard_drop();

        assert_eq!(state.lines(), 10);
        assert_eq!(state.level(), 2);
        assert_eq!(state.drop_interval_ms(), 925);
        // Gravity timer restarted at the new rate.
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_drop_interval_floor_at_high_lines() {
        let mut state = running_with(PieceKind::I);
        state.lines = 119;
        state.level = 12;
        state.drop_interval_ms = scoring::drop_interval_ms(12);

        fill_row_except(&mut state, 19, 4);
        state.active = Some(ActivePiece {
            kind: PieceKind::I,
            rotation: 1,
            x: 3,
            y: 0,
        });
        state.hard_drop();

        assert_eq!(state.lines(), 120);
        assert_eq!(state.level(), 13);
        assert_eq!(state.drop_interval_ms(), 100);

        // Further clears never go below the floor.
        state.status = GameStatus::Running;
        state.board.clear();
        state.lines = 149;
        state.level = 15;
        fill_row_except(&mut state, 19, 4);
        state.active = Some(ActivePiece {
            kind: PieceKind::I,
            rotation: 1,
            x: 3,
            y: 0,
        });
        state.hard_drop();
        assert_eq!(state.drop_interval_ms(), 100);
    }

    #[test]
    fn test_tick_accumulates_to_gravity_step() {
        let mut state = GameState::new(12345);
        state.start();
        let y0 = state.active().unwrap().y;

        assert!(!state.tick(999));
        assert_eq!(state.active().unwrap().y, y0);

        assert!(state.tick(1));
        assert_eq!(state.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn test_tick_locks_grounded_piece() {
        let mut state = running_with(PieceKind::O);
        while state.try_move(0, 1) {}

        assert!(state.tick(state.drop_interval_ms()));

        // Piece locked at the bottom and a new one spawned.
        assert_eq!(state.board.occupied_count(), 4);
        assert_eq!(state.active().unwrap().y, 0);
    }

    #[test]
    fn test_blocked_spawn_ends_game_without_board_mutation() {
        let mut state = GameState::new(12345);
        state.status = GameStatus::Running;

        // Stack reaching into the spawn rows: only the top row left open.
        for y in 1..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                state.board.set(x, y, Some(PieceKind::Z));
            }
        }
        let occupied_before = state.board.occupied_count();

        assert!(!state.spawn_piece());
        assert_eq!(state.status(), GameStatus::GameOver);
        assert!(state.active().is_none());
        assert_eq!(state.board.occupied_count(), occupied_before);

        // Everything is inert after game over.
        assert!(!state.tick(10_000));
        assert!(!state.apply_action(GameAction::HardDrop));
    }

    #[test]
    fn test_start_resets_after_game_over() {
        let mut state = GameState::new(12345);
        state.status = GameStatus::Running;
        state.score = 4200;
        state.lines = 37;
        state.level = 4;
        state.drop_interval_ms = scoring::drop_interval_ms(4);
        state.board.set(0, 19, Some(PieceKind::J));
        state.status = GameStatus::GameOver;

        state.start();

        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert_eq!(state.board.occupied_count(), 0);
        assert!(state.active().is_some());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(42);
        state.start();
        state.apply_action(GameAction::HardDrop);

        let snap = state.snapshot();
        assert_eq!(snap.status, state.status());
        assert_eq!(snap.score, state.score());
        assert_eq!(snap.level, state.level());
        assert_eq!(snap.lines, state.lines());
        assert_eq!(snap.drop_interval_ms, state.drop_interval_ms());

        let cells: usize = snap
            .board
            .iter()
            .flatten()
            .filter(|&&v| v != 0)
            .count();
        assert_eq!(cells, state.board.occupied_count());
    }

    #[test]
    fn test_same_seed_same_piece_sequence() {
        let mut a = GameState::new(2024);
        let mut b = GameState::new(2024);
        a.start();
        b.start();

        for _ in 0..10 {
            assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
            a.apply_action(GameAction::HardDrop);
            b.apply_action(GameAction::HardDrop);
        }
        assert_eq!(a.snapshot().board, b.snapshot().board);
    }
}
