use tracing::{debug, error};

use crate::{
    HoldUnavailableError,
    core::{
        board::{Board, FullRows},
        piece::{Kick, Piece, PieceKind, RotationDirection},
    },
};

use super::{collaborator::GuidePiece, piece_queue::PieceQueue};

/// Result of locking the falling piece.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum LockOutcome {
    /// The piece came to rest with a block above the board; nothing was written.
    ToppedOut,
    /// The piece is part of the board now.
    Locked { full_rows: FullRows },
}

/// Board, falling piece and piece queue of one game.
///
/// The `try_*` methods report whether a move is legal without changing
/// anything; the plain methods apply the move unconditionally and expect the
/// caller to have checked first.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameField, PieceQueue, RotationDirection};
///
/// let mut field = GameField::new(PieceQueue::new(3));
///
/// if field.try_move_left() {
///     field.move_left();
/// }
/// field.rotate_with_kicks(RotationDirection::Clockwise, true);
///
/// while field.try_move_down() {
///     field.move_down();
/// }
/// let outcome = field.lock_falling_piece();
/// assert!(outcome.is_locked());
/// ```
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    queue: PieceQueue,
}

impl GameField {
    #[must_use]
    pub fn new(mut queue: PieceQueue) -> Self {
        let falling_piece = Piece::new(queue.load_from_queue());
        Self {
            board: Board::EMPTY,
            falling_piece,
            queue,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.queue.held()
    }

    #[must_use]
    pub fn queued_piece(&self) -> PieceKind {
        self.queue.queued()
    }

    #[must_use]
    pub fn try_move_left(&self) -> bool {
        self.falling_piece.can_move(&self.board, -1, 0)
    }

    #[must_use]
    pub fn try_move_right(&self) -> bool {
        self.falling_piece.can_move(&self.board, 1, 0)
    }

    #[must_use]
    pub fn try_move_up(&self) -> bool {
        self.falling_piece.can_move(&self.board, 0, -1)
    }

    #[must_use]
    pub fn try_move_down(&self) -> bool {
        self.falling_piece.can_move(&self.board, 0, 1)
    }

    pub fn move_left(&mut self) {
        self.falling_piece = self.falling_piece.left();
    }

    pub fn move_right(&mut self) {
        self.falling_piece = self.falling_piece.right();
    }

    pub fn move_up(&mut self) {
        self.falling_piece = self.falling_piece.up();
    }

    pub fn move_down(&mut self) {
        self.falling_piece = self.falling_piece.down();
    }

    #[must_use]
    pub fn try_rotate(&self, direction: RotationDirection) -> bool {
        self.falling_piece.can_rotate(&self.board, direction)
    }

    pub fn rotate(&mut self, direction: RotationDirection) {
        self.falling_piece = self.falling_piece.rotated(direction);
    }

    /// Rotates if the turn, or one of the kicks when allowed, fits.
    ///
    /// Returns the kick that was used; on `None` the piece is unchanged.
    pub fn rotate_with_kicks(
        &mut self,
        direction: RotationDirection,
        allow_kicks: bool,
    ) -> Option<Kick> {
        let (piece, kick) =
            self.falling_piece
                .kicked_rotation(&self.board, direction, allow_kicks)?;
        if !kick.is_none() {
            debug!(kind = ?piece.kind(), ?direction, ?kick, "kicked rotation");
        }
        self.falling_piece = piece;
        Some(kick)
    }

    /// Landing position of the falling piece.
    #[must_use]
    pub fn guide(&self) -> GuidePiece {
        let offset = self.falling_piece.drop_distance(&self.board);
        GuidePiece {
            piece: self.falling_piece.simulate_drop_position(&self.board),
            offset,
        }
    }

    /// Spawns the queued kind at its entry position and refills the queue.
    pub fn load_from_queue(&mut self) {
        self.falling_piece = Piece::new(self.queue.load_from_queue());
    }

    /// Starts the next lock cycle: spawns from the queue and rearms hold.
    pub fn start_next_piece(&mut self) {
        self.load_from_queue();
        self.queue.rearm_hold();
    }

    /// Swaps the falling piece with the hold slot; the incoming kind enters
    /// at its entry position.
    pub fn swap_with_hold(&mut self) -> Result<PieceKind, HoldUnavailableError> {
        let outgoing = self.falling_piece.kind();
        let incoming = self.queue.hold(outgoing)?;
        self.falling_piece = Piece::new(incoming);
        debug!(held = ?outgoing, active = ?incoming, "hold swap");
        Ok(incoming)
    }

    pub fn reroll_queue(&mut self) -> Option<PieceKind> {
        self.queue.reroll()
    }

    /// Writes the falling piece into the board, unless it is still partly
    /// above the board, which ends the game.
    pub fn lock_falling_piece(&mut self) -> LockOutcome {
        let piece = self.falling_piece;
        if piece.is_above_board() {
            return LockOutcome::ToppedOut;
        }
        let result = self.board.lock(piece.blocks(), piece.kind());
        debug_assert!(result.is_ok(), "locked a piece outside the board: {result:?}");
        if let Err(err) = result {
            error!(%err, kind = ?piece.kind(), "locked piece clamped to the board");
            self.board.lock_clamped(piece.blocks(), piece.kind());
        }
        LockOutcome::Locked {
            full_rows: self.board.find_full_rows(),
        }
    }

    pub fn clear_rows(&mut self, rows: &[usize]) {
        self.board.clear_rows(rows);
    }

    /// Empties the board and the hold slot and spawns a fresh piece.
    pub fn reset(&mut self) {
        self.board.reset();
        self.queue.reset();
        self.load_from_queue();
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_falling_piece(&mut self, piece: Piece) {
        self.falling_piece = piece;
    }
}
