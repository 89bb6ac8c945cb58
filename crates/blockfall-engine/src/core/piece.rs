use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::board::Board;

/// Absolute cell coordinate on the board.
///
/// `x` grows rightward from column 0 and `y` grows downward from row 0. A
/// negative `y` denotes a cell above the visible board that a newly spawned
/// piece still occupies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
}

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Cells the piece occupies when it enters the board.
    ///
    /// Every shape enters in rows -2 and -1, above the visible playfield.
    #[must_use]
    pub const fn spawn_blocks(self) -> [BlockPos; 4] {
        SPAWN_BLOCKS[self as usize]
    }

    /// Index into [`PieceKind::spawn_blocks`] of the block the shape rotates
    /// about, or `None` for the square which never rotates.
    #[must_use]
    pub const fn pivot_index(self) -> Option<usize> {
        PIVOT_INDICES[self as usize]
    }
}

const SPAWN_BLOCKS: [[BlockPos; 4]; PieceKind::LEN] = {
    const fn p(x: i32, y: i32) -> BlockPos {
        BlockPos::new(x, y)
    }
    [
        // I-piece
        [p(3, -2), p(4, -2), p(5, -2), p(6, -2)],
        // O-piece
        [p(4, -2), p(4, -1), p(5, -2), p(5, -1)],
        // T-piece
        [p(3, -2), p(4, -2), p(4, -1), p(5, -2)],
        // S-piece
        [p(3, -1), p(4, -2), p(4, -1), p(5, -2)],
        // Z-piece
        [p(3, -2), p(4, -2), p(4, -1), p(5, -1)],
        // J-piece
        [p(3, -2), p(3, -1), p(4, -1), p(5, -1)],
        // L-piece
        [p(3, -1), p(3, -2), p(4, -2), p(5, -2)],
    ]
};

const PIVOT_INDICES: [Option<usize>; PieceKind::LEN] = [
    Some(2), // I
    None,    // O
    Some(1), // T
    Some(1), // S
    Some(1), // Z
    Some(2), // J
    Some(2), // L
];

/// Direction of a quarter turn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum RotationDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }

    /// Maps an offset from the pivot to its rotated offset.
    const fn transform(self, dx: i32, dy: i32) -> (i32, i32) {
        match self {
            RotationDirection::Clockwise => (-dy, dx),
            RotationDirection::CounterClockwise => (dy, -dx),
        }
    }
}

/// Shift applied before a rotation to make it fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Kick {
    /// Rotated in place.
    None,
    /// Shifted one column right.
    Right,
    /// Shifted one column left.
    Left,
    /// Shifted one row up.
    Up,
}

impl Kick {
    /// Attempt order of a kicked rotation.
    pub const ORDER: [Self; 4] = [Kick::None, Kick::Right, Kick::Left, Kick::Up];

    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Kick::None => (0, 0),
            Kick::Right => (1, 0),
            Kick::Left => (-1, 0),
            Kick::Up => (0, -1),
        }
    }
}

/// A falling piece: its kind and the absolute coordinates of its four blocks.
///
/// Pieces are immutable values. Translation and rotation return new pieces;
/// legality against a [`Board`] is checked separately so that callers can
/// validate a candidate before committing it.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, RotationDirection};
///
/// let board = Board::EMPTY;
/// let piece = Piece::new(PieceKind::T);
/// assert!(piece.can_move(&board, 0, 1));
///
/// let turned = piece.down().rotated(RotationDirection::Clockwise);
/// assert!(turned.fits(&board));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    blocks: [BlockPos; 4],
}

impl Piece {
    /// Creates a piece at its entry coordinates.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            blocks: kind.spawn_blocks(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn blocks(&self) -> [BlockPos; 4] {
        self.blocks
    }

    #[must_use]
    pub fn pivot(&self) -> Option<BlockPos> {
        self.kind.pivot_index().map(|i| self.blocks[i])
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            blocks: self.blocks.map(|pos| pos.offset(dx, dy)),
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub fn up(&self) -> Self {
        self.translated(0, -1)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.translated(0, 1)
    }

    /// Rotates a quarter turn about the pivot block without any legality check.
    ///
    /// A piece without a pivot is returned unchanged.
    #[must_use]
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let Some(pivot) = self.pivot() else {
            return *self;
        };
        let blocks = self.blocks.map(|pos| {
            let (dx, dy) = direction.transform(pos.x - pivot.x, pos.y - pivot.y);
            pivot.offset(dx, dy)
        });
        Self {
            kind: self.kind,
            blocks,
        }
    }

    /// Returns whether every block is inside the walls, above the floor and on
    /// an empty cell. Rows above the board always fit.
    #[must_use]
    pub fn fits(&self, board: &Board) -> bool {
        !board.is_colliding(self)
    }

    #[must_use]
    pub fn can_move(&self, board: &Board, dx: i32, dy: i32) -> bool {
        self.translated(dx, dy).fits(board)
    }

    #[must_use]
    pub fn can_rotate(&self, board: &Board, direction: RotationDirection) -> bool {
        self.rotated(direction).fits(board)
    }

    /// Finds the first legal rotation, trying the straight turn and then
    /// each kick of [`Kick::ORDER`].
    ///
    /// A kick shift must itself be legal before the turn is attempted on top
    /// of it. With `allow_kicks` unset only the straight turn is tried.
    /// Returns `None` when nothing fits; `self` is never modified.
    #[must_use]
    pub fn kicked_rotation(
        &self,
        board: &Board,
        direction: RotationDirection,
        allow_kicks: bool,
    ) -> Option<(Self, Kick)> {
        let kicks = if allow_kicks {
            &Kick::ORDER[..]
        } else {
            &Kick::ORDER[..1]
        };
        kicks.iter().find_map(|&kick| {
            let (dx, dy) = kick.offset();
            let shifted = self.translated(dx, dy);
            if kick != Kick::None && !shifted.fits(board) {
                return None;
            }
            let rotated = shifted.rotated(direction);
            rotated.fits(board).then_some((rotated, kick))
        })
    }

    /// Returns whether any block still lies above the visible board.
    #[must_use]
    pub fn is_above_board(&self) -> bool {
        self.blocks.iter().any(|pos| pos.y < 0)
    }

    #[must_use]
    pub fn leftmost_column(&self) -> i32 {
        self.blocks.iter().map(|pos| pos.x).min().unwrap_or_default()
    }

    #[must_use]
    pub fn rightmost_column(&self) -> i32 {
        self.blocks.iter().map(|pos| pos.x).max().unwrap_or_default()
    }

    /// Number of rows the piece can fall before coming to rest.
    #[must_use]
    pub fn drop_distance(&self, board: &Board) -> u32 {
        let mut distance = 0;
        let mut dropped = *self;
        while dropped.can_move(board, 0, 1) {
            dropped = dropped.down();
            distance += 1;
        }
        distance
    }

    /// Returns the piece moved down as far as it can fall.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        let distance = self.drop_distance(board);
        self.translated(0, i32::try_from(distance).unwrap_or(0))
    }
}
