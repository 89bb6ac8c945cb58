//! Game rules and session state.
//!
//! This module builds a playable game on top of the board and piece types:
//!
//! - [`GameField`] - Board, falling piece and piece queue of one game
//! - [`GameProgress`] - Score, lines, level and fall speed
//! - [`GravityTimer`] - Frame counter for automatic falls and locks
//! - [`PieceQueue`] - Seedable random piece source with hold and rerolls
//! - [`GameSession`] - Menus, countdown, play, pause and game over, driven one
//!   frame at a time
//!
//! # Frame Flow
//!
//! Each call to [`GameSession::step`]:
//!
//! 1. Turns the held buttons into actions for the current mode
//! 2. Applies the actions (movement, rotation, hold, menu changes)
//! 3. Advances timers: countdown, gravity, line-clear animation, game-over
//!    display
//!
//! Locking a piece either tops out the game, spawns the next piece, or, when
//! rows are full, scores them and plays the clear animation before the rows
//! are removed.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Button, ButtonSet, EngineConfig, GameSession, NullAudio, PieceSeed};
//!
//! let mut config = EngineConfig::default();
//! config.timing.countdown_frames = 0;
//!
//! let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut session = GameSession::with_seed(config, seed);
//! let mut audio = NullAudio;
//!
//! session.step(ButtonSet::from(Button::Start), &mut audio);
//! session.step(ButtonSet::from(Button::Up), &mut audio);
//!
//! assert_eq!(session.field().board().occupied_count(), 4);
//! ```

pub use self::{
    collaborator::*, config::*, game_field::*, game_progress::*, game_session::*, gravity::*,
    piece_queue::*, settings::*,
};

mod collaborator;
mod config;
mod game_field;
mod game_progress;
mod game_session;
mod gravity;
mod piece_queue;
mod settings;
