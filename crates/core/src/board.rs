//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is either empty or holds
//! the locked [`Block`] that occupies it. Storage is a flat row-major vector
//! sized once at construction.
//!
//! Coordinates: rows grow downward from row 0 at the top, columns grow to the
//! right. Block positions are in board units and map to cells by floor
//! division by the cell size.
//!
//! Every query here answers with a plain `bool`/`Option`. Out-of-bounds
//! positions and already-filled cells are ordinary outcomes, never errors.

use crate::piece::{Block, Geometry, Piece};
use crate::types::{Direction, Point};

/// A board cell: the locked block occupying it, if any
pub type Cell = Option<Block>;

/// (row, col) position of a cell; may lie outside the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub row: i32,
    pub col: i32,
}

impl CellIndex {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: u16,
    cols: u16,
    cell_size: i32,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board. Dimensions are clamped to at least one cell.
    pub fn new(rows: u16, cols: u16, cell_size: i32) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            cell_size: cell_size.max(1),
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    /// Size a board from canvas dimensions in board units
    pub fn from_canvas(width: i32, height: i32, cell_size: i32) -> Self {
        let cell_size = cell_size.max(1);
        let cols = (width / cell_size).clamp(1, u16::MAX as i32) as u16;
        let rows = (height / cell_size).clamp(1, u16::MAX as i32) as u16;
        Self::new(rows, cols, cell_size)
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= self.rows as i32 || col < 0 || col >= self.cols as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Board width in board units
    pub fn width_px(&self) -> i32 {
        self.cols as i32 * self.cell_size
    }

    /// Board height in board units
    pub fn height_px(&self) -> i32 {
        self.rows as i32 * self.cell_size
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            cell_size: self.cell_size,
            width: self.width_px(),
            height: self.height_px(),
        }
    }

    /// Map a position to the cell containing it
    pub fn cell_of(&self, pos: Point) -> CellIndex {
        CellIndex {
            row: pos.y.div_euclid(self.cell_size),
            col: pos.x.div_euclid(self.cell_size),
        }
    }

    /// Top-left corner of a cell in board units
    pub fn cell_origin(&self, cell: CellIndex) -> Point {
        Point::new(cell.col * self.cell_size, cell.row * self.cell_size)
    }

    pub fn is_in_bounds(&self, cell: CellIndex) -> bool {
        self.index(cell.row, cell.col).is_some()
    }

    /// Get cell at (row, col).
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Filled and in bounds
    pub fn is_filled(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    pub fn occupant(&self, row: i32, col: i32) -> Option<&Block> {
        self.index(row, col).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Place a block into the cell containing it.
    /// Returns false (and changes nothing) if that cell is out of bounds or filled.
    pub fn occupy(&mut self, block: Block) -> bool {
        let cell = self.cell_of(block.position());
        match self.index(cell.row, cell.col) {
            Some(idx) if self.cells[idx].is_none() => {
                self.cells[idx] = Some(block);
                true
            }
            _ => false,
        }
    }

    /// Occupy the board with every block of a piece.
    /// Returns how many blocks were placed.
    pub fn lock(&mut self, piece: &Piece) -> usize {
        let mut placed = 0;
        for block in piece.blocks() {
            if self.occupy(*block) {
                placed += 1;
            }
        }
        placed
    }

    /// Does `block` collide with the board in `direction`?
    ///
    /// - `Down`: the cell below is filled, or the block is on the bottom row.
    /// - `Left`/`Right`: the adjacent cell or the diagonal-down cell on that
    ///   side is filled. Board walls are not collisions here; the anchor check
    ///   in [`Board::can_move_left`]/[`Board::can_move_right`] handles them.
    ///
    /// A block outside the board never collides.
    pub fn collides(&self, block: &Block, direction: Direction) -> bool {
        let cell = self.cell_of(block.position());
        if !self.is_in_bounds(cell) {
            return false;
        }

        match direction {
            Direction::Down => {
                cell.row + 1 >= self.rows as i32 || self.is_filled(cell.row + 1, cell.col)
            }
            Direction::Left | Direction::Right => {
                let col = cell.col + direction.dx();
                self.is_filled(cell.row, col) || self.is_filled(cell.row + 1, col)
            }
        }
    }

    /// True if any block of the piece collides downward
    pub fn piece_collides_down(&self, piece: &Piece) -> bool {
        piece
            .blocks()
            .iter()
            .any(|block| self.collides(block, Direction::Down))
    }

    /// True if any on-board block of the piece sits in a filled cell
    pub fn overlaps(&self, piece: &Piece) -> bool {
        piece.blocks().iter().any(|block| {
            let cell = self.cell_of(block.position());
            self.is_filled(cell.row, cell.col)
        })
    }

    pub fn can_move_left(&self, piece: &Piece) -> bool {
        if piece.x() <= 0 {
            return false;
        }
        piece
            .left_edge_blocks()
            .iter()
            .all(|block| !self.collides(block, Direction::Left))
    }

    pub fn can_move_right(&self, piece: &Piece) -> bool {
        if piece.x() + piece.width() >= self.width_px() {
            return false;
        }
        piece
            .right_edge_blocks()
            .iter()
            .all(|block| !self.collides(block, Direction::Right))
    }

    /// Cells of one row, or None if out of range
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows as usize {
            return None;
        }
        let start = row * self.cols as usize;
        Some(&self.cells[start..start + self.cols as usize])
    }

    /// Check if a row is completely filled
    pub fn row_is_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_some()))
    }

    /// Empty every cell in a row.
    /// Returns false if the row is out of range.
    pub fn clear_row(&mut self, row: usize) -> bool {
        if row >= self.rows as usize {
            return false;
        }
        let start = row * self.cols as usize;
        let end = start + self.cols as usize;
        self.cells[start..end].fill(None);
        true
    }

    /// Move every row above `row` down by one, overwriting `row`.
    ///
    /// Moved blocks drop by one cell height. Row 0 is left empty.
    /// Returns false if the row is out of range.
    pub fn shift_down(&mut self, row: usize) -> bool {
        if row >= self.rows as usize {
            return false;
        }

        let width = self.cols as usize;
        let cell_size = self.cell_size;
        for r in (1..=row).rev() {
            let src = (r - 1) * width;
            let dst = r * width;
            for c in 0..width {
                self.cells[dst + c] = self.cells[src + c].map(|mut block| {
                    block.y += cell_size;
                    block
                });
            }
        }

        self.cells[..width].fill(None);
        true
    }

    /// True if any cell of row 0 is filled (game over)
    pub fn is_top_row_occupied(&self) -> bool {
        self.row(0)
            .is_some_and(|cells| cells.iter().any(|cell| cell.is_some()))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every filled cell with its occupant, in row-major order
    pub fn occupants(&self) -> impl Iterator<Item = (CellIndex, &Block)> + '_ {
        let cols = self.cols as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|block| (CellIndex::new((i / cols) as i32, (i % cols) as i32), block))
        })
    }

    /// Count of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        use crate::types::{BOARD_COLS, BOARD_ROWS, CELL_SIZE};
        Self::new(BOARD_ROWS, BOARD_COLS, CELL_SIZE)
    }
}
