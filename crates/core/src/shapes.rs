//! Shapes module - rotation state tables for the seven piece kinds
//!
//! Every piece is described by a cyclic list of [`RotationState`]s. Offsets are
//! in cells relative to the piece anchor, which is the bottom-left corner of the
//! piece: `dx` grows to the right, `dy` is negative because blocks sit above the
//! anchor.
//!
//! Each state also carries its left and right *edge* block indices: the blocks
//! whose horizontal neighbour on that side is not another block of the same
//! piece. Lateral collision checks only need to look at those.

use crate::types::PieceKind;

/// Offset of a single block relative to the piece anchor, in cells
pub type BlockOffset = (i8, i8);

/// One rotation state of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    pub name: &'static str,
    pub offsets: [BlockOffset; 4],
    /// Bounding width in cells
    pub width: u8,
    pub left_edge: &'static [usize],
    pub right_edge: &'static [usize],
}

impl RotationState {
    /// Bounding height in cells
    pub fn height(&self) -> u8 {
        self.offsets
            .iter()
            .map(|&(_, dy)| (-dy) as u8)
            .max()
            .unwrap_or(0)
    }
}

/// Get the rotation states for a piece kind
///
/// Square has a single state; every other kind cycles through four. Bar, S and
/// Z only have two distinct geometries, so their cycle repeats them.
pub fn states(kind: PieceKind) -> &'static [RotationState] {
    match kind {
        PieceKind::Square => &SQUARE_STATES,
        PieceKind::Bar => &BAR_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::T => &T_STATES,
    }
}

// Square
//
// XX
// XX
const SQUARE: RotationState = RotationState {
    name: "SQUARE",
    offsets: [(0, -1), (0, -2), (1, -1), (1, -2)],
    width: 2,
    left_edge: &[0, 1],
    right_edge: &[2, 3],
};

const SQUARE_STATES: [RotationState; 1] = [SQUARE];

// Bar
const BAR_HORIZONTAL: RotationState = RotationState {
    name: "HORIZONTAL",
    offsets: [(0, -1), (1, -1), (2, -1), (3, -1)],
    width: 4,
    left_edge: &[0],
    right_edge: &[3],
};

const BAR_VERTICAL: RotationState = RotationState {
    name: "VERTICAL",
    offsets: [(0, -1), (0, -2), (0, -3), (0, -4)],
    width: 1,
    left_edge: &[0, 1, 2, 3],
    right_edge: &[0, 1, 2, 3],
};

const BAR_STATES: [RotationState; 4] = [BAR_HORIZONTAL, BAR_VERTICAL, BAR_HORIZONTAL, BAR_VERTICAL];

// S
//
// .XX    X.
// XX.    XX
//        .X
const S_HORIZONTAL: RotationState = RotationState {
    name: "HORIZONTAL",
    offsets: [(0, -1), (1, -1), (1, -2), (2, -2)],
    width: 3,
    left_edge: &[0, 2],
    right_edge: &[1, 3],
};

const S_VERTICAL: RotationState = RotationState {
    name: "VERTICAL",
    offsets: [(1, -1), (1, -2), (0, -2), (0, -3)],
    width: 2,
    left_edge: &[0, 2, 3],
    right_edge: &[0, 1, 3],
};

const S_STATES: [RotationState; 4] = [S_HORIZONTAL, S_VERTICAL, S_HORIZONTAL, S_VERTICAL];

// Z
//
// XX.    .X
// .XX    XX
//        X.
const Z_HORIZONTAL: RotationState = RotationState {
    name: "HORIZONTAL",
    offsets: [(0, -2), (1, -2), (1, -1), (2, -1)],
    width: 3,
    left_edge: &[0, 2],
    right_edge: &[1, 3],
};

const Z_VERTICAL: RotationState = RotationState {
    name: "VERTICAL",
    offsets: [(0, -1), (0, -2), (1, -2), (1, -3)],
    width: 2,
    left_edge: &[0, 1, 3],
    right_edge: &[0, 2, 3],
};

const Z_STATES: [RotationState; 4] = [Z_HORIZONTAL, Z_VERTICAL, Z_HORIZONTAL, Z_VERTICAL];

// L
//
// ..X    X.    XXX    XX
// XXX    X.    X..    .X
//        XX           .X
const L_STATES: [RotationState; 4] = [
    RotationState {
        name: "BOTTOM-RIGHT",
        offsets: [(0, -1), (1, -1), (2, -1), (2, -2)],
        width: 3,
        left_edge: &[0, 3],
        right_edge: &[2, 3],
    },
    RotationState {
        name: "BOTTOM-DOWN",
        offsets: [(0, -3), (0, -2), (0, -1), (1, -1)],
        width: 2,
        left_edge: &[0, 1, 2],
        right_edge: &[0, 1, 3],
    },
    RotationState {
        name: "BOTTOM-LEFT",
        offsets: [(0, -1), (0, -2), (1, -2), (2, -2)],
        width: 3,
        left_edge: &[0, 1],
        right_edge: &[0, 3],
    },
    RotationState {
        name: "BOTTOM-UP",
        offsets: [(0, -3), (1, -3), (1, -2), (1, -1)],
        width: 2,
        left_edge: &[0, 2, 3],
        right_edge: &[1, 2, 3],
    },
];

// J
//
// X..    .X    XXX    XX
// XXX    .X    ..X    X.
//        XX           X.
const J_STATES: [RotationState; 4] = [
    RotationState {
        name: "BOTTOM-LEFT",
        offsets: [(0, -1), (0, -2), (1, -1), (2, -1)],
        width: 3,
        left_edge: &[0, 1],
        right_edge: &[1, 3],
    },
    RotationState {
        name: "BOTTOM-DOWN",
        offsets: [(1, -3), (1, -2), (1, -1), (0, -1)],
        width: 2,
        left_edge: &[0, 1, 3],
        right_edge: &[0, 1, 2],
    },
    RotationState {
        name: "BOTTOM-RIGHT",
        offsets: [(0, -2), (1, -2), (2, -2), (2, -1)],
        width: 3,
        left_edge: &[0, 3],
        right_edge: &[2, 3],
    },
    RotationState {
        name: "BOTTOM-UP",
        offsets: [(0, -3), (1, -3), (0, -2), (0, -1)],
        width: 2,
        left_edge: &[0, 2, 3],
        right_edge: &[1, 2, 3],
    },
];

// T
//
// .X.    X.    XXX    .X
// XXX    XX    .X.    XX
//        X.           .X
const T_STATES: [RotationState; 4] = [
    RotationState {
        name: "BOTTOM-DOWN",
        offsets: [(0, -1), (1, -1), (1, -2), (2, -1)],
        width: 3,
        left_edge: &[0, 2],
        right_edge: &[2, 3],
    },
    RotationState {
        name: "BOTTOM-LEFT",
        offsets: [(0, -1), (0, -2), (1, -2), (0, -3)],
        width: 2,
        left_edge: &[0, 1, 3],
        right_edge: &[0, 2, 3],
    },
    RotationState {
        name: "BOTTOM-UP",
        offsets: [(0, -2), (1, -2), (1, -1), (2, -2)],
        width: 3,
        left_edge: &[0, 2],
        right_edge: &[2, 3],
    },
    RotationState {
        name: "BOTTOM-RIGHT",
        offsets: [(0, -2), (1, -3), (1, -2), (1, -1)],
        width: 2,
        left_edge: &[0, 1, 3],
        right_edge: &[1, 2, 3],
    },
];
