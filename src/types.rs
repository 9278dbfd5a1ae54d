//! Shared vocabulary for the rules engine.
//!
//! Pure data types and tuning tables with no game logic attached. Everything
//! a presentation layer needs to talk to the core lives here.

use serde::{Deserialize, Serialize};

/// Board dimensions. The visible field is `BOARD_WIDTH` x `BOARD_HEIGHT`;
/// `EXTRA_HEIGHT` hidden rows sit above it as spawn headroom.
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;
pub const EXTRA_HEIGHT: u8 = 4;
pub const TOTAL_HEIGHT: u8 = BOARD_HEIGHT + EXTRA_HEIGHT;

/// The seven tetromino shapes.
///
/// `R` occupies the slot conventionally called J; the remaining names match
/// the usual lettering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    L,
    O,
    R,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All shapes, in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::O,
        PieceKind::R,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Stable index into [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::L => 1,
            PieceKind::O => 2,
            PieceKind::R => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::R => "R",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// One discrete input intent per tick. The core is agnostic to physical key
/// bindings; soft drop is a held modifier passed alongside the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerInput {
    None,
    Left,
    Right,
    RotateLeft,
    RotateRight,
    HardDrop,
    Swap,
    Pause,
}

/// T-spin classification for a locking T piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TSpinKind {
    None,
    Mini,
    Full,
}

impl TSpinKind {
    /// Numeric code used by the modern scoring table (0 = none, 1 = mini,
    /// 2 = full).
    pub fn index(self) -> u32 {
        match self {
            TSpinKind::None => 0,
            TSpinKind::Mini => 1,
            TSpinKind::Full => 2,
        }
    }
}

/// A board cell: empty, or the shape tag of the locked piece occupying it.
pub type Cell = Option<PieceKind>;

/// Classic line-clear points by clear size.
pub const CLASSIC_LINE_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];

/// Modern line-clear points, indexed by clear type.
///
/// The index packs (t-spin, lines) as `(tspin == full ? 4 : 5) * tspin + lines`
/// so entries land at [0,4] no t-spin, [5,7] mini t-spin, [8,11] full t-spin
/// with no wasted slots.
pub const MODERN_LINE_POINTS: [u32; 12] = [
    0, 100, 300, 500, 800, // no t-spin: 0-4 lines
    100, 200, 400, // mini t-spin: 0-2 lines
    400, 800, 1200, 1600, // full t-spin: 0-3 lines
];

/// Modern combo bonus per combo step (scaled by level in the score engine).
pub const COMBO_BONUS: u32 = 50;

/// Back-to-back multiplier, expressed as a ratio so integer math stays exact
/// (every modern table entry is even).
pub const B2B_NUMERATOR: u32 = 3;
pub const B2B_DENOMINATOR: u32 = 2;
