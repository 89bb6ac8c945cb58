use std::time::Duration;

use crate::{Board, FullRows, GameProgress, HighScores, Piece, PieceKind};

use super::{
    game_session::SessionMode,
    settings::{OptionsMenu, Settings, StartMenuItem},
};

/// Sound effects the engine asks the host to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// One to three rows cleared.
    LineClear,
    /// Four rows cleared at once.
    LineClearFour,
    /// Level up.
    Success,
    /// Options menu navigation.
    Tick,
    Hold,
    /// Hard drop that moved the piece.
    Drop,
    GameOver,
}

/// Audio output of a session.
pub trait Audio {
    fn play_sound_effect(&mut self, effect: SoundEffect);
    fn play_music(&mut self);
    fn stop_music(&mut self, fade: Duration);
}

/// Audio sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl Audio for NullAudio {
    fn play_sound_effect(&mut self, _effect: SoundEffect) {}
    fn play_music(&mut self) {}
    fn stop_music(&mut self, _fade: Duration) {}
}

/// Animation style for a line clear, chosen by the number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ClearAnimation {
    Vanish,
    Flash,
    Sweep,
    Explode,
}

impl ClearAnimation {
    #[must_use]
    pub fn for_count(count: usize) -> Self {
        match count {
            0 | 1 => ClearAnimation::Vanish,
            2 => ClearAnimation::Flash,
            3 => ClearAnimation::Sweep,
            _ => ClearAnimation::Explode,
        }
    }
}

/// Rows being cleared and the frames left in their animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub rows: FullRows,
    pub frames_left: u32,
}

impl LineClear {
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn animation(&self) -> ClearAnimation {
        ClearAnimation::for_count(self.count())
    }
}

/// Projected landing position of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidePiece {
    pub piece: Piece,
    /// Rows between the falling piece and the landing position.
    pub offset: u32,
}

/// Read-only view of everything a frame needs beyond the pieces themselves.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub mode: &'a SessionMode,
    pub progress: &'a GameProgress,
    pub high_scores: HighScores,
    pub settings: &'a Settings,
    pub start_selection: StartMenuItem,
    pub options_menu: Option<&'a OptionsMenu>,
    pub rerolls_left: u32,
    pub secret_unlocked: bool,
}

/// Presentation of a session.
///
/// [`GameSession::present`](crate::GameSession::present) calls the methods in
/// declaration order once per frame, skipping the piece methods when there is
/// nothing to draw. Implementations own all drawing decisions.
pub trait Renderer {
    fn render_board(&mut self, board: &Board);
    fn render_active_piece(&mut self, piece: &Piece);
    fn render_guide_piece(&mut self, guide: &GuidePiece);
    fn render_held_piece(&mut self, kind: Option<PieceKind>);
    fn render_next_piece(&mut self, kind: Option<PieceKind>);
    fn render_line_clear(&mut self, clear: &LineClear);
    fn render_status(&mut self, snapshot: &Snapshot<'_>);
}
