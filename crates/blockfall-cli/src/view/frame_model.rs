use blockfall_engine::{
    Board, GameSession, GuidePiece, HighScores, LineClear, OptionsMenu, Piece, PieceKind,
    Renderer, SessionMode, Settings, Snapshot, StartMenuItem,
};

/// Everything the engine presented for one frame, owned so widgets can
/// render it after the session call returns.
#[derive(Debug, Default)]
pub(crate) struct FrameModel {
    pub(crate) board: Board,
    pub(crate) active: Option<Piece>,
    pub(crate) guide: Option<GuidePiece>,
    pub(crate) held: Option<PieceKind>,
    pub(crate) next: Option<PieceKind>,
    pub(crate) line_clear: Option<LineClear>,
    pub(crate) status: Option<StatusModel>,
}

#[derive(Debug, Clone)]
pub(crate) struct StatusModel {
    pub(crate) mode: SessionMode,
    pub(crate) score: u32,
    pub(crate) level: u32,
    pub(crate) total_lines: u32,
    pub(crate) remaining_lines: u32,
    pub(crate) high_scores: HighScores,
    pub(crate) settings: Settings,
    pub(crate) start_selection: StartMenuItem,
    pub(crate) options_menu: Option<OptionsMenu>,
    pub(crate) rerolls_left: u32,
    pub(crate) secret_unlocked: bool,
}

impl FrameModel {
    pub(crate) fn capture(session: &GameSession) -> Self {
        let mut model = Self::default();
        session.present(&mut model);
        model
    }

    pub(crate) fn settings(&self) -> Settings {
        self.status
            .as_ref()
            .map(|status| status.settings)
            .unwrap_or_default()
    }
}

impl Renderer for FrameModel {
    fn render_board(&mut self, board: &Board) {
        self.board.clone_from(board);
    }

    fn render_active_piece(&mut self, piece: &Piece) {
        self.active = Some(*piece);
    }

    fn render_guide_piece(&mut self, guide: &GuidePiece) {
        // A guide right under the piece only adds clutter.
        self.guide = (guide.offset > 1).then_some(*guide);
    }

    fn render_held_piece(&mut self, kind: Option<PieceKind>) {
        self.held = kind;
    }

    fn render_next_piece(&mut self, kind: Option<PieceKind>) {
        self.next = kind;
    }

    fn render_line_clear(&mut self, clear: &LineClear) {
        self.line_clear = Some(clear.clone());
    }

    fn render_status(&mut self, snapshot: &Snapshot<'_>) {
        let progress = snapshot.progress;
        self.status = Some(StatusModel {
            mode: snapshot.mode.clone(),
            score: progress.score(),
            level: progress.level(),
            total_lines: progress.total_lines(),
            remaining_lines: progress.remaining_lines(),
            high_scores: snapshot.high_scores,
            settings: *snapshot.settings,
            start_selection: snapshot.start_selection,
            options_menu: snapshot.options_menu.cloned(),
            rerolls_left: snapshot.rerolls_left,
            secret_unlocked: snapshot.secret_unlocked,
        });
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Button, ButtonSet, EngineConfig, NullAudio, PieceSeed};

    use super::*;

    fn session() -> GameSession {
        let mut config = EngineConfig::default();
        config.timing.countdown_frames = 0;
        GameSession::with_seed(config, PieceSeed::from_bytes([9; 16]))
    }

    #[test]
    fn test_start_menu_capture() {
        let model = FrameModel::capture(&session());
        assert!(model.active.is_none());
        assert!(model.next.is_none());
        let status = model.status.unwrap();
        assert!(status.mode.is_start_menu());
        assert_eq!(status.start_selection, StartMenuItem::StartGame);
    }

    #[test]
    fn test_playing_capture() {
        let mut session = session();
        session.step(ButtonSet::from(Button::Start), &mut NullAudio);
        let model = FrameModel::capture(&session);
        assert_eq!(model.active, Some(*session.field().falling_piece()));
        assert!(model.guide.is_some());
        assert_eq!(model.next, Some(session.field().queued_piece()));
        assert_eq!(model.status.unwrap().level, 1);
    }
}
