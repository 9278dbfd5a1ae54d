//! Tetromino geometry: shape tables, rotation states, wall-kick data.
//!
//! Cell offsets are precomputed per (shape, rotation state) rather than
//! derived by rotating at runtime; real kick tables are irregular enough that
//! a closed-form rotation is not worth trusting. Coordinates are x right,
//! y up, offsets relative to the piece anchor.
//!
//! Rotation states run 0..4. A rotation by `delta` (+1 counter-clockwise,
//! -1 clockwise) advances the state as `(state - delta + 4) % 4`, so state
//! `s` is the spawn footprint turned `s` quarter-turns clockwise.

use crate::types::PieceKind;

/// Offset of a single cell relative to the piece anchor.
pub type CellOffset = (i8, i8);

/// The four cells of a piece in one rotation state.
pub type PieceCells = [CellOffset; 4];

/// Initial rotation state for freshly generated pieces.
pub const INITIAL_ROTATION_STATE: u8 = 0;

/// Anchor position where new pieces enter the field.
pub const SPAWN_POSITION: (i8, i8) = (4, 19);

const I_CELLS: [PieceCells; 4] = [
    [(-1, 0), (0, 0), (1, 0), (2, 0)],
    [(0, 2), (0, 1), (0, 0), (0, -1)],
    [(2, 1), (1, 1), (0, 1), (-1, 1)],
    [(1, -1), (1, 0), (1, 1), (1, 2)],
];

const L_CELLS: [PieceCells; 4] = [
    [(1, 1), (-1, 0), (0, 0), (1, 0)],
    [(1, -1), (0, 1), (0, 0), (0, -1)],
    [(-1, -1), (1, 0), (0, 0), (-1, 0)],
    [(-1, 1), (0, -1), (0, 0), (0, 1)],
];

// The O piece has a single effective footprint; all four states share it.
const O_CELLS: [PieceCells; 4] = [[(0, 0), (1, 0), (0, 1), (1, 1)]; 4];

const R_CELLS: [PieceCells; 4] = [
    [(-1, 1), (-1, 0), (0, 0), (1, 0)],
    [(1, 1), (0, 1), (0, 0), (0, -1)],
    [(1, -1), (1, 0), (0, 0), (-1, 0)],
    [(-1, -1), (0, -1), (0, 0), (0, 1)],
];

const S_CELLS: [PieceCells; 4] = [
    [(-1, 0), (0, 0), (0, 1), (1, 1)],
    [(0, 1), (0, 0), (1, 0), (1, -1)],
    [(1, 0), (0, 0), (0, -1), (-1, -1)],
    [(0, -1), (0, 0), (-1, 0), (-1, 1)],
];

const T_CELLS: [PieceCells; 4] = [
    [(-1, 0), (0, 0), (1, 0), (0, 1)],
    [(0, 1), (0, 0), (0, -1), (1, 0)],
    [(1, 0), (0, 0), (-1, 0), (0, -1)],
    [(0, -1), (0, 0), (0, 1), (-1, 0)],
];

const Z_CELLS: [PieceCells; 4] = [
    [(-1, 1), (0, 1), (0, 0), (1, 0)],
    [(1, 1), (1, 0), (0, 0), (0, -1)],
    [(1, -1), (0, -1), (0, 0), (-1, 0)],
    [(-1, -1), (-1, 0), (0, 0), (0, 1)],
];

/// Cell offsets for a shape in a given rotation state.
pub fn shape_cells(kind: PieceKind, state: u8) -> PieceCells {
    let state = state as usize % 4;
    match kind {
        PieceKind::I => I_CELLS[state],
        PieceKind::L => L_CELLS[state],
        PieceKind::O => O_CELLS[state],
        PieceKind::R => R_CELLS[state],
        PieceKind::S => S_CELLS[state],
        PieceKind::T => T_CELLS[state],
        PieceKind::Z => Z_CELLS[state],
    }
}

/// Advance a rotation state by `delta` (+1 counter-clockwise, -1 clockwise).
pub fn next_rotation_state(current: u8, delta: i8) -> u8 {
    debug_assert!(delta == 1 || delta == -1);
    ((current as i8 - delta + 4) % 4) as u8
}

/// Ordered wall-kick translation candidates for one rotation transition.
pub type KickOffsets = [CellOffset; 4];

// Kick candidates for the non-I, non-O shapes, keyed by the
// (previous, current) state pair that selects them.
const LRSTZ_KICKS: [KickOffsets; 4] = [
    // 0->1 or 2->1
    [(-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0 or 1->2
    [(1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->3 or 0->3
    [(1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2 or 3->0
    [(-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

// The I piece uses its own table.
const I_KICKS: [KickOffsets; 4] = [
    // 0->1 or 3->2
    [(-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->0 or 2->3
    [(2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2 or 0->3
    [(-1, 0), (2, 0), (-1, 2), (2, 1)],
    // 2->1 or 3->0
    [(-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Kick candidates for a rotation that moved `previous -> current`.
///
/// Panics for the O shape: its footprint never changes, so a blocked O
/// rotation cannot happen and asking for its kicks is a caller bug.
pub fn kick_options(kind: PieceKind, previous: u8, current: u8) -> &'static KickOffsets {
    match kind {
        PieceKind::O => panic!("O piece should not request kick options"),
        PieceKind::I => match (previous, current) {
            (0, 1) | (3, 2) => &I_KICKS[0],
            (1, 0) | (2, 3) => &I_KICKS[1],
            (1, 2) | (0, 3) => &I_KICKS[2],
            (2, 1) | (3, 0) => &I_KICKS[3],
            _ => unreachable!("unhandled wall kick transition {previous}->{current}"),
        },
        _ => match (previous, current) {
            (0, 1) | (2, 1) => &LRSTZ_KICKS[0],
            (1, 0) | (1, 2) => &LRSTZ_KICKS[1],
            (2, 3) | (0, 3) => &LRSTZ_KICKS[2],
            (3, 2) | (3, 0) => &LRSTZ_KICKS[3],
            _ => unreachable!("unhandled wall kick transition {previous}->{current}"),
        },
    }
}

/// Rotate an offset a quarter-turn clockwise `times` times.
fn rotate_offset_cw(offset: CellOffset, times: u8) -> CellOffset {
    let (mut x, mut y) = offset;
    for _ in 0..times % 4 {
        let (rx, ry) = (y, -x);
        x = rx;
        y = ry;
    }
    (x, y)
}

/// The active falling piece: shape, rotation state, and anchor position.
///
/// A plain value type; the board and game loop own all the context it moves
/// through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: u8,
    pub previous_rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// A fresh piece at the spawn anchor in the initial rotation state.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: INITIAL_ROTATION_STATE,
            previous_rotation: 3,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Cell offsets for the current rotation state.
    pub fn cells(&self) -> PieceCells {
        shape_cells(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four cells.
    pub fn world_cells(&self) -> [(i8, i8); 4] {
        let mut out = self.cells();
        for cell in &mut out {
            cell.0 += self.x;
            cell.1 += self.y;
        }
        out
    }

    /// Apply a rotation, remembering the previous state for kick lookup.
    pub fn rotate(&mut self, delta: i8) {
        self.previous_rotation = self.rotation;
        self.rotation = next_rotation_state(self.rotation, delta);
    }

    pub fn translate(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }

    /// Rotate back to the initial state one step at a time.
    pub fn reset_rotation(&mut self) {
        while self.rotation != INITIAL_ROTATION_STATE {
            self.rotate(1);
        }
    }

    /// The two corner cells on the side the T nub points toward, in board
    /// coordinates. Only meaningful for the T shape.
    pub fn t_spin_major_cells(&self) -> [(i8, i8); 2] {
        self.corner_cells([(1, 1), (-1, 1)])
    }

    /// The two opposite corner cells.
    pub fn t_spin_minor_cells(&self) -> [(i8, i8); 2] {
        self.corner_cells([(-1, -1), (1, -1)])
    }

    fn corner_cells(&self, base: [CellOffset; 2]) -> [(i8, i8); 2] {
        base.map(|offset| {
            let (dx, dy) = rotate_offset_cw(offset, self.rotation);
            (self.x + dx, self.y + dy)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_state_advances_against_delta() {
        assert_eq!(next_rotation_state(0, -1), 1);
        assert_eq!(next_rotation_state(1, -1), 2);
        assert_eq!(next_rotation_state(3, -1), 0);
        assert_eq!(next_rotation_state(0, 1), 3);
        assert_eq!(next_rotation_state(3, 1), 2);
    }

    #[test]
    fn o_footprint_is_rotation_invariant() {
        for state in 1..4 {
            assert_eq!(shape_cells(PieceKind::O, state), shape_cells(PieceKind::O, 0));
        }
    }

    #[test]
    fn every_shape_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for state in 0..4 {
                let cells = shape_cells(kind, state);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(cells[i], cells[j], "{kind:?} state {state}");
                    }
                }
            }
        }
    }

    #[test]
    fn states_are_clockwise_quarter_turns_of_spawn() {
        // Excluding I (rotates about a cell corner) and O (invariant).
        for kind in [PieceKind::L, PieceKind::R, PieceKind::S, PieceKind::T, PieceKind::Z] {
            for state in 0..4u8 {
                let mut expected: Vec<CellOffset> = shape_cells(kind, 0)
                    .iter()
                    .map(|&c| rotate_offset_cw(c, state))
                    .collect();
                let mut actual: Vec<CellOffset> = shape_cells(kind, state).to_vec();
                expected.sort_unstable();
                actual.sort_unstable();
                assert_eq!(expected, actual, "{kind:?} state {state}");
            }
        }
    }

    #[test]
    fn kick_options_cover_all_single_step_transitions() {
        for kind in PieceKind::ALL {
            if kind == PieceKind::O {
                continue;
            }
            for previous in 0..4u8 {
                for delta in [-1i8, 1] {
                    let current = next_rotation_state(previous, delta);
                    let kicks = kick_options(kind, previous, current);
                    assert_eq!(kicks.len(), 4);
                    // Stable: the same transition always yields the same list.
                    assert_eq!(kicks, kick_options(kind, previous, current));
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "O piece should not request kick options")]
    fn o_piece_kick_request_is_fatal() {
        kick_options(PieceKind::O, 0, 1);
    }

    #[test]
    fn i_uses_a_distinct_kick_table() {
        assert_ne!(
            kick_options(PieceKind::I, 0, 1),
            kick_options(PieceKind::T, 0, 1)
        );
    }

    #[test]
    fn tetromino_rotate_tracks_previous_state() {
        let mut piece = Tetromino::spawn(PieceKind::T);
        piece.rotate(-1);
        assert_eq!(piece.rotation, 1);
        assert_eq!(piece.previous_rotation, 0);
        piece.rotate(-1);
        assert_eq!(piece.rotation, 2);
        assert_eq!(piece.previous_rotation, 1);
    }

    #[test]
    fn reset_rotation_returns_to_initial_state() {
        let mut piece = Tetromino::spawn(PieceKind::L);
        piece.rotate(-1);
        piece.rotate(-1);
        piece.rotate(-1);
        piece.reset_rotation();
        assert_eq!(piece.rotation, INITIAL_ROTATION_STATE);
    }

    #[test]
    fn t_spin_corners_follow_rotation() {
        let mut piece = Tetromino::spawn(PieceKind::T);
        piece.x = 5;
        piece.y = 10;
        // Spawn state: nub points up, majors are the upper corners.
        assert_eq!(piece.t_spin_major_cells(), [(6, 11), (4, 11)]);
        assert_eq!(piece.t_spin_minor_cells(), [(4, 9), (6, 9)]);
        // Two clockwise rotations point the nub down; corners swap sides.
        piece.rotate(-1);
        piece.rotate(-1);
        assert_eq!(piece.t_spin_major_cells(), [(4, 9), (6, 9)]);
        assert_eq!(piece.t_spin_minor_cells(), [(6, 11), (4, 11)]);
    }

    #[test]
    fn world_cells_offset_by_anchor() {
        let mut piece = Tetromino::spawn(PieceKind::I);
        piece.x = 3;
        piece.y = 5;
        assert_eq!(piece.world_cells(), [(2, 5), (3, 5), (4, 5), (5, 5)]);
    }
}
