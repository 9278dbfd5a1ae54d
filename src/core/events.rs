//! Events the core reports outward.
//!
//! The presentation layer drains these from each tick and mirrors them as
//! visuals (committed blocks, clear flashes, banners, end screens). The core
//! holds no reference to whoever consumes them.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, TSpinKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece was committed to the board.
    PieceLocked {
        cells: [(i8, i8); 4],
        kind: PieceKind,
    },
    /// A clearing lock: everything a banner or flash needs to know.
    LinesCleared {
        /// Cleared row indices, ascending from the bottom.
        rows: ArrayVec<u8, 4>,
        tspin: TSpinKind,
        /// Combo counter after this clear; 0 is the first link of a chain.
        combo: i32,
        back_to_back: bool,
        is_tetris: bool,
    },
    /// The level rose; the caller should expect a faster fall interval.
    LeveledUp { level: u32 },
    /// The stack reached the hidden rows. Terminal.
    GameOver,
}

/// At most a lock, a clear, a level-up and a game-over can coincide.
pub type EventQueue = ArrayVec<GameEvent, 4>;
