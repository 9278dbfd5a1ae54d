//! Zero-allocation observer snapshot of the whole game state.
//!
//! A presentation layer keeps one [`GameSnapshot`] around and refreshes it
//! with [`Game::snapshot_into`](crate::core::Game::snapshot_into) each frame.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::core::game::{Game, Phase};
use crate::core::pieces::Tetromino;
use crate::types::{PieceKind, BOARD_WIDTH, TOTAL_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Shape indices (0 = empty, 1..=7 = shape), row 0 at the bottom.
    pub board: [[u8; BOARD_WIDTH as usize]; TOTAL_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Where the active piece would rest.
    pub ghost: Option<(i8, i8)>,
    pub hold: Option<PieceKind>,
    pub preview: ArrayVec<PieceKind, { GameConfig::MAX_PREVIEWS }>,
    pub can_swap: bool,
    pub phase: Phase,
    pub paused: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: i32,
    pub back_to_back_armed: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase != Phase::GameOver && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; TOTAL_HEIGHT as usize],
            active: None,
            ghost: None,
            hold: None,
            preview: ArrayVec::new(),
            can_swap: true,
            phase: Phase::Spawning,
            paused: false,
            score: 0,
            level: 0,
            lines: 0,
            combo: -1,
            back_to_back_armed: false,
        }
    }
}

impl Game {
    /// Refresh `out` in place; no allocation beyond the preview copy.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board().write_grid(&mut out.board);
        out.active = self.active().map(ActiveSnapshot::from);
        out.ghost = self.ghost_position();
        out.hold = self.held_piece();
        out.preview.clear();
        out.preview.extend(self.preview().iter().copied());
        out.can_swap = self.can_swap();
        out.phase = self.phase();
        out.paused = self.paused();
        out.score = self.score().score();
        out.level = self.score().level();
        out.lines = self.score().line_total();
        out.combo = self.score().combo();
        out.back_to_back_armed = self.score().back_to_back_armed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
