//! Piece module - blocks and the falling piece state machine
//!
//! A [`Piece`] is an anchor position plus a cyclic list of rotation states. Its
//! four [`Block`]s always sit at `anchor + offset * cell_size` for the current
//! state; the piece recomputes them on every move. Pieces never look at the
//! board: callers check [`crate::Board::can_move_left`] and friends first.

use arrayvec::ArrayVec;

use crate::shapes::{states, RotationState};
use crate::types::{PieceKind, Point, NORMAL_FALL_DISTANCE};

/// Board dimensions in board units, as seen by a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub cell_size: i32,
    pub width: i32,
    pub height: i32,
}

/// A single 1x1 unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub x: i32,
    pub y: i32,
    pub landed: bool,
}

impl Block {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            landed: false,
        }
    }

    /// A block that is already part of the board
    pub fn landed(x: i32, y: i32) -> Self {
        Self { x, y, landed: true }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A falling piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    anchor: Point,
    states: &'static [RotationState],
    state_index: usize,
    blocks: [Block; 4],
    landed: bool,
    fall_distance: i32,
    geometry: Geometry,
}

impl Piece {
    /// Create a piece in its first rotation state with its anchor at `anchor`
    pub fn new(kind: PieceKind, anchor: Point, geometry: Geometry) -> Self {
        let mut piece = Self {
            kind,
            anchor,
            states: states(kind),
            state_index: 0,
            blocks: [Block::new(0, 0); 4],
            landed: false,
            fall_distance: NORMAL_FALL_DISTANCE,
            geometry,
        };
        piece.move_to(anchor.x, anchor.y);
        piece
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn x(&self) -> i32 {
        self.anchor.x
    }

    pub fn y(&self) -> i32 {
        self.anchor.y
    }

    pub fn blocks(&self) -> &[Block; 4] {
        &self.blocks
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn state(&self) -> &'static RotationState {
        &self.states[self.state_index]
    }

    pub fn state_index(&self) -> usize {
        self.state_index
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Bounding width of the current state in board units
    pub fn width(&self) -> i32 {
        self.state().width as i32 * self.geometry.cell_size
    }

    pub fn fall_distance(&self) -> i32 {
        self.fall_distance
    }

    pub fn set_fall_distance(&mut self, fall_distance: i32) {
        self.fall_distance = fall_distance;
    }

    /// Blocks whose left neighbour is not part of this piece
    pub fn left_edge_blocks(&self) -> ArrayVec<Block, 4> {
        self.state()
            .left_edge
            .iter()
            .map(|&i| self.blocks[i])
            .collect()
    }

    /// Blocks whose right neighbour is not part of this piece
    pub fn right_edge_blocks(&self) -> ArrayVec<Block, 4> {
        self.state()
            .right_edge
            .iter()
            .map(|&i| self.blocks[i])
            .collect()
    }

    /// Set the anchor and reposition every block from the current state.
    /// No validation.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.anchor = Point::new(x, y);
        let cell = self.geometry.cell_size;
        let offsets = self.state().offsets;
        for (block, &(dx, dy)) in self.blocks.iter_mut().zip(offsets.iter()) {
            block.x = x + dx as i32 * cell;
            block.y = y + dy as i32 * cell;
        }
    }

    /// Largest anchor x that keeps the current state on the board
    fn max_x(&self) -> i32 {
        (self.geometry.width - self.width()).max(0)
    }

    /// Shift one cell left, clamped at the left edge
    pub fn left_move(&mut self) {
        let target = if self.anchor.x <= 0 {
            0
        } else {
            (self.anchor.x - self.geometry.cell_size).max(0)
        };
        self.move_to(target, self.anchor.y);
    }

    /// Shift one cell right, clamped at the right edge
    pub fn right_move(&mut self) {
        let max_x = self.max_x();
        let target = if self.anchor.x >= max_x {
            max_x
        } else {
            (self.anchor.x + self.geometry.cell_size).min(max_x)
        };
        self.move_to(target, self.anchor.y);
    }

    /// Rotation is suppressed while the anchor is within two rows of the top,
    /// so a freshly spawned piece cannot rotate blocks off the grid.
    fn can_rotate(&self) -> bool {
        self.anchor.y > 2 * self.geometry.cell_size
    }

    /// Advance to the next rotation state.
    ///
    /// Returns false when rotation is suppressed near the top. Does not check
    /// locked blocks.
    pub fn rotate_right(&mut self) -> bool {
        if !self.can_rotate() {
            return false;
        }
        self.state_index = (self.state_index + 1) % self.states.len();
        self.reclamp();
        true
    }

    /// Retreat to the previous rotation state. See [`Piece::rotate_right`].
    pub fn rotate_left(&mut self) -> bool {
        if !self.can_rotate() {
            return false;
        }
        let len = self.states.len();
        self.state_index = (self.state_index + len - 1) % len;
        self.reclamp();
        true
    }

    fn reclamp(&mut self) {
        let x = self.anchor.x.min(self.max_x()).max(0);
        self.move_to(x, self.anchor.y);
    }

    /// Fall by one increment unless landed
    pub fn tick(&mut self) {
        if !self.landed {
            self.move_to(self.anchor.x, self.anchor.y + self.fall_distance);
        }
    }

    /// Mark the piece and its blocks as landed. Irreversible.
    pub fn land(&mut self) {
        self.landed = true;
        for block in &mut self.blocks {
            block.landed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CELL_SIZE;
    use proptest::prelude::*;

    fn geometry() -> Geometry {
        Geometry {
            cell_size: CELL_SIZE,
            width: 10 * CELL_SIZE,
            height: 20 * CELL_SIZE,
        }
    }

    fn assert_blocks_follow_anchor(piece: &Piece) {
        let state = piece.state();
        for (i, block) in piece.blocks().iter().enumerate() {
            let (dx, dy) = state.offsets[i];
            assert_eq!(block.x, piece.x() + dx as i32 * CELL_SIZE);
            assert_eq!(block.y, piece.y() + dy as i32 * CELL_SIZE);
        }
    }

    #[test]
    fn test_new_piece_positions_blocks() {
        let piece = Piece::new(PieceKind::Square, Point::new(64, 160), geometry());
        assert_eq!(piece.state().name, "SQUARE");
        assert_eq!(piece.blocks()[0].position(), Point::new(64, 144));
        assert_eq!(piece.blocks()[3].position(), Point::new(80, 128));
        assert!(!piece.is_landed());
    }

    #[test]
    fn test_rotation_suppressed_near_top() {
        let mut piece = Piece::new(PieceKind::T, Point::new(64, 2 * CELL_SIZE), geometry());
        assert!(!piece.rotate_right());
        assert!(!piece.rotate_left());
        assert_eq!(piece.state_index(), 0);
        assert_blocks_follow_anchor(&piece);
    }

    #[test]
    fn test_rotate_left_wraps() {
        let mut piece = Piece::new(PieceKind::L, Point::new(64, 160), geometry());
        assert!(piece.rotate_left());
        assert_eq!(piece.state_index(), 3);
        assert_eq!(piece.state().name, "BOTTOM-UP");
        assert_blocks_follow_anchor(&piece);
    }

    #[test]
    fn test_rotation_reclamps_right_edge() {
        // Vertical bar hugging the right wall becomes a 4-wide horizontal bar.
        let mut piece = Piece::new(PieceKind::Bar, Point::new(64, 160), geometry());
        assert!(piece.rotate_right());
        assert_eq!(piece.state().name, "VERTICAL");
        for _ in 0..10 {
            piece.right_move();
        }
        assert_eq!(piece.x(), 9 * CELL_SIZE);

        assert!(piece.rotate_right());
        assert_eq!(piece.state().name, "HORIZONTAL");
        assert_eq!(piece.x(), 6 * CELL_SIZE);
        assert_blocks_follow_anchor(&piece);
    }

    #[test]
    fn test_tick_falls_until_landed() {
        let mut piece = Piece::new(PieceKind::Z, Point::new(64, 160), geometry());
        piece.tick();
        assert_eq!(piece.y(), 160 + NORMAL_FALL_DISTANCE);
        assert_blocks_follow_anchor(&piece);

        piece.land();
        piece.tick();
        assert_eq!(piece.y(), 160 + NORMAL_FALL_DISTANCE);
    }

    #[test]
    fn test_land_marks_blocks() {
        let mut piece = Piece::new(PieceKind::J, Point::new(64, 160), geometry());
        piece.land();
        assert!(piece.is_landed());
        assert!(piece.blocks().iter().all(|b| b.landed));
    }

    #[test]
    fn test_edge_blocks_follow_table() {
        let piece = Piece::new(PieceKind::Bar, Point::new(32, 160), geometry());
        let left = piece.left_edge_blocks();
        let right = piece.right_edge_blocks();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].x, 32);
        assert_eq!(right.len(), 1);
        assert_eq!(right[0].x, 32 + 3 * CELL_SIZE);
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Left,
        Right,
        RotateRight,
        RotateLeft,
        Tick,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Left),
            Just(Op::Right),
            Just(Op::RotateRight),
            Just(Op::RotateLeft),
            Just(Op::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_blocks_follow_anchor_and_stay_in_columns(
            kind in 0usize..7,
            col in 0i32..7,
            ops in prop::collection::vec(op(), 0..60),
        ) {
            let kind = PieceKind::ALL[kind];
            let mut piece = Piece::new(kind, Point::new(col * CELL_SIZE, 64), geometry());
            for op in ops {
                match op {
                    Op::Left => piece.left_move(),
                    Op::Right => piece.right_move(),
                    Op::RotateRight => {
                        piece.rotate_right();
                    }
                    Op::RotateLeft => {
                        piece.rotate_left();
                    }
                    Op::Tick => piece.tick(),
                }
                assert_blocks_follow_anchor(&piece);
                prop_assert!(piece.x() >= 0);
                prop_assert!(piece.x() + piece.width() <= geometry().width);
            }
        }
    }
}
