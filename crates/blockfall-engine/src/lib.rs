//! Gameplay engine for a ten-column falling-block puzzle.
//!
//! The engine owns the playfield, the falling/queued/held pieces, scoring and
//! the per-frame input state machine. Presentation is left to [`Renderer`] and
//! [`Audio`] implementations supplied by the host, which is expected to call
//! [`GameSession::step`] once per displayed frame.

pub use self::{core::*, engine::*, input::*};

pub mod core;
pub mod engine;
pub mod input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({x}, {y}) lies outside the board")]
pub struct OutOfBoundsError {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("hold already used since the last lock")]
pub struct HoldUnavailableError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceSeedParseError {
    #[display("seed must be 32 hexadecimal digits, got {_0} characters")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hexadecimal digit {_0:?} in seed")]
    InvalidDigit(#[error(not(source))] char),
}
