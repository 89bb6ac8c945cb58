use std::iter;

use arrayvec::ArrayVec;

use crate::OutOfBoundsError;

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{BlockPos, Piece, PieceKind},
};

/// Contents of a single board cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell filled by a locked piece of the given kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub const fn piece_kind(self) -> Option<PieceKind> {
        match self {
            Block::Empty => None,
            Block::Piece(kind) => Some(kind),
        }
    }
}

pub type BoardRow = [Block; BOARD_WIDTH];

/// Indices of full rows, ordered top to bottom.
pub type FullRows = ArrayVec<usize, BOARD_HEIGHT>;

const EMPTY_ROW: BoardRow = [Block::Empty; BOARD_WIDTH];

/// Grid of locked blocks.
///
/// Row 0 is the top of the visible playfield and row `HEIGHT - 1` the bottom.
/// The falling piece is never stored here; its cells are written only when it
/// locks. Rows with a negative index lie above the board and are treated as
/// permanently empty.
///
/// # Example
///
/// ```
/// use blockfall_engine::{BlockPos, Board, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let cells = [(0, 17), (1, 17), (2, 17), (3, 17)].map(|(x, y)| BlockPos::new(x, y));
/// board.lock(cells, PieceKind::I).unwrap();
///
/// assert!(board.is_occupied(2, 17));
/// assert!(!board.is_occupied(2, -1));
/// assert!(board.find_full_rows().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    fn cell_index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < BOARD_WIDTH)?;
        let y = usize::try_from(y).ok().filter(|y| *y < BOARD_HEIGHT)?;
        Some((x, y))
    }

    /// Returns the block at the given cell, or [`Block::Empty`] outside the grid.
    #[must_use]
    pub fn block_at(&self, x: i32, y: i32) -> Block {
        Self::cell_index(x, y).map_or(Block::Empty, |(x, y)| self.rows[y][x])
    }

    /// Returns whether the cell holds a locked block.
    ///
    /// Cells above the board (`y < 0`) are never occupied.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.block_at(x, y).is_occupied()
    }

    /// Returns whether a falling block may occupy the given cell.
    ///
    /// Walls and the floor are solid, rows above the board are passable.
    #[must_use]
    pub fn is_free(&self, pos: BlockPos) -> bool {
        let within_walls = usize::try_from(pos.x).is_ok_and(|x| x < BOARD_WIDTH);
        let above_floor = usize::try_from(pos.y)
            .ok()
            .is_none_or(|y| y < BOARD_HEIGHT);
        within_walls && above_floor && !self.is_occupied(pos.x, pos.y)
    }

    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece.blocks().iter().any(|pos| !self.is_free(*pos))
    }

    #[must_use]
    pub fn rows(&self) -> &[BoardRow; BOARD_HEIGHT] {
        &self.rows
    }

    /// Writes the given cells permanently into the board.
    ///
    /// Every cell is validated before the board is touched, so a failed lock
    /// leaves the board unchanged.
    pub fn lock(&mut self, cells: [BlockPos; 4], kind: PieceKind) -> Result<(), OutOfBoundsError> {
        let mut resolved = [(0, 0); 4];
        for (slot, pos) in iter::zip(&mut resolved, cells) {
            *slot = Self::cell_index(pos.x, pos.y).ok_or(OutOfBoundsError { x: pos.x, y: pos.y })?;
        }
        for (x, y) in resolved {
            self.rows[y][x] = Block::Piece(kind);
        }
        Ok(())
    }

    /// Locks only the cells that lie inside the grid and drops the rest.
    pub fn lock_clamped(&mut self, cells: [BlockPos; 4], kind: PieceKind) {
        for pos in cells {
            if let Some((x, y)) = Self::cell_index(pos.x, pos.y) {
                self.rows[y][x] = Block::Piece(kind);
            }
        }
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|block| block.is_occupied()))
    }

    /// Returns the indices of all full rows, top to bottom.
    #[must_use]
    pub fn find_full_rows(&self) -> FullRows {
        (0..BOARD_HEIGHT).filter(|y| self.is_row_full(*y)).collect()
    }

    /// Removes the given rows and shifts every row above each of them down by one.
    ///
    /// Rows are processed in the order given, which must be top to bottom
    /// (as returned by [`Board::find_full_rows`]): removing an upper row never
    /// changes the index of a lower one.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        debug_assert!(rows.is_sorted(), "rows must be ordered top to bottom");
        for &y in rows {
            if y >= BOARD_HEIGHT {
                continue;
            }
            self.rows.copy_within(0..y, 1);
            self.rows[0] = EMPTY_ROW;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|block| block.is_occupied())
            .count()
    }

    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, y: usize, gaps: &[usize], kind: PieceKind) {
        for (x, block) in self.rows[y].iter_mut().enumerate() {
            *block = if gaps.contains(&x) {
                Block::Empty
            } else {
                Block::Piece(kind)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: [(i32, i32); 4]) -> [BlockPos; 4] {
        coords.map(|(x, y)| BlockPos::new(x, y))
    }

    mod occupancy {
        use super::*;

        #[test]
        fn test_empty_board() {
            let board = Board::EMPTY;
            for y in 0..18 {
                for x in 0..10 {
                    assert!(!board.is_occupied(x, y), "({x}, {y}) should be empty");
                }
            }
            assert_eq!(board.occupied_count(), 0);
        }

        #[test]
        fn test_rows_above_board_are_never_occupied() {
            let mut board = Board::EMPTY;
            board.fill_row_except(0, &[], PieceKind::T);
            assert!(board.is_occupied(4, 0));
            assert!(!board.is_occupied(4, -1));
            assert!(!board.is_occupied(4, -20));
        }

        #[test]
        fn test_walls_and_floor_are_not_free() {
            let board = Board::EMPTY;
            assert!(!board.is_free(BlockPos::new(-1, 5)));
            assert!(!board.is_free(BlockPos::new(10, 5)));
            assert!(!board.is_free(BlockPos::new(4, 18)));
            assert!(board.is_free(BlockPos::new(4, -3)));
            assert!(board.is_free(BlockPos::new(0, 17)));
            assert!(board.is_free(BlockPos::new(9, 17)));
        }
    }

    mod locking {
        use super::*;

        #[test]
        fn test_lock_marks_cells() {
            let mut board = Board::EMPTY;
            board
                .lock(cells([(4, 16), (5, 16), (4, 17), (5, 17)]), PieceKind::O)
                .unwrap();
            assert_eq!(board.block_at(4, 16), Block::Piece(PieceKind::O));
            assert_eq!(board.block_at(5, 17), Block::Piece(PieceKind::O));
            assert_eq!(board.occupied_count(), 4);
        }

        #[test]
        fn test_lock_out_of_bounds_leaves_board_untouched() {
            let mut board = Board::EMPTY;
            let err = board
                .lock(cells([(4, -1), (4, 0), (4, 1), (4, 2)]), PieceKind::I)
                .unwrap_err();
            assert_eq!(err, OutOfBoundsError { x: 4, y: -1 });
            assert_eq!(board.occupied_count(), 0);

            let err = board
                .lock(cells([(7, 17), (8, 17), (9, 17), (10, 17)]), PieceKind::I)
                .unwrap_err();
            assert_eq!(err, OutOfBoundsError { x: 10, y: 17 });
            assert_eq!(board.occupied_count(), 0);
        }

        #[test]
        fn test_lock_clamped_drops_outside_cells() {
            let mut board = Board::EMPTY;
            board.lock_clamped(cells([(4, -2), (4, -1), (4, 0), (4, 1)]), PieceKind::I);
            assert_eq!(board.occupied_count(), 2);
            assert!(board.is_occupied(4, 0));
            assert!(board.is_occupied(4, 1));
        }
    }

    mod line_clear {
        use super::*;

        #[test]
        fn test_find_full_rows_top_to_bottom() {
            let mut board = Board::EMPTY;
            board.fill_row_except(17, &[], PieceKind::I);
            board.fill_row_except(15, &[], PieceKind::J);
            board.fill_row_except(16, &[3], PieceKind::L);
            assert_eq!(board.find_full_rows().as_slice(), &[15, 17]);
        }

        #[test]
        fn test_clear_single_bottom_row() {
            let mut board = Board::EMPTY;
            board.fill_row_except(17, &[], PieceKind::I);
            board.fill_row_except(16, &[0, 1], PieceKind::T);

            let full = board.find_full_rows();
            assert_eq!(full.as_slice(), &[17]);
            board.clear_rows(&full);

            assert!(board.find_full_rows().is_empty());
            assert_eq!(board.block_at(5, 17), Block::Piece(PieceKind::T));
            assert!(!board.is_occupied(0, 17));
            assert_eq!(board.rows()[16], EMPTY_ROW);
        }

        #[test]
        fn test_clear_rows_preserves_order_of_remaining_rows() {
            let mut board = Board::EMPTY;
            // Marker rows interleaved with full rows.
            board.fill_row_except(10, &[0], PieceKind::S);
            board.fill_row_except(11, &[], PieceKind::I);
            board.fill_row_except(12, &[1], PieceKind::Z);
            board.fill_row_except(13, &[], PieceKind::I);
            board.fill_row_except(14, &[], PieceKind::I);
            board.fill_row_except(15, &[2], PieceKind::J);
            board.fill_row_except(16, &[], PieceKind::I);
            board.fill_row_except(17, &[3], PieceKind::L);

            let full = board.find_full_rows();
            assert_eq!(full.as_slice(), &[11, 13, 14, 16]);
            board.clear_rows(&full);

            assert!(board.find_full_rows().is_empty());
            let kinds: Vec<_> = board.rows()[14..]
                .iter()
                .map(|row| row[9].piece_kind())
                .collect();
            assert_eq!(
                kinds,
                [
                    Some(PieceKind::S),
                    Some(PieceKind::Z),
                    Some(PieceKind::J),
                    Some(PieceKind::L),
                ]
            );
            assert!(board.rows()[..14].iter().all(|row| *row == EMPTY_ROW));
        }

        #[test]
        fn test_clear_rows_on_arbitrary_boards_leaves_no_full_rows() {
            // Deterministic pseudo-random fill patterns.
            let mut state = 0x2545_f491_u32;
            for _ in 0..64 {
                let mut board = Board::EMPTY;
                for y in 0..Board::HEIGHT {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    match state % 3 {
                        0 => board.fill_row_except(y, &[], PieceKind::O),
                        1 => board.fill_row_except(y, &[(state as usize >> 8) % 10], PieceKind::T),
                        _ => {}
                    }
                }
                let partial_before: Vec<_> = board
                    .rows()
                    .iter()
                    .filter(|row| row.iter().any(|b| b.is_empty()) && *row != &EMPTY_ROW)
                    .copied()
                    .collect();

                let full = board.find_full_rows();
                board.clear_rows(&full);

                assert!(board.find_full_rows().is_empty());
                let partial_after: Vec<_> = board
                    .rows()
                    .iter()
                    .filter(|row| *row != &EMPTY_ROW)
                    .copied()
                    .collect();
                assert_eq!(partial_after, partial_before);
            }
        }

        #[test]
        fn test_reset_clears_all_cells() {
            let mut board = Board::EMPTY;
            board.fill_row_except(3, &[4], PieceKind::Z);
            board.reset();
            assert_eq!(board, Board::EMPTY);
        }
    }
}
