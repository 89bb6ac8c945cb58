use std::time::Duration;

use tracing::{debug, info, trace};

use crate::{
    core::piece::RotationDirection,
    input::{Action, ButtonSet, InputContext, InputStateMachine},
};

use super::{
    collaborator::{Audio, LineClear, Renderer, Snapshot, SoundEffect},
    config::EngineConfig,
    game_field::{GameField, LockOutcome},
    game_progress::{GameProgress, HighScores},
    gravity::{GravityTick, GravityTimer},
    piece_queue::{PieceQueue, PieceSeed},
    settings::{OptionsMenu, Palette, Settings, StartMenuItem},
};

/// Fade applied when music is switched off from the options menu.
const MUSIC_FADE: Duration = Duration::from_secs(5);

/// Where the options menu returns to when closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MenuOrigin {
    StartMenu,
    Paused,
}

/// Current state of a session. Exactly one applies at a time.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionMode {
    StartMenu,
    OptionsMenu { origin: MenuOrigin },
    /// Short delay before the first piece starts to fall.
    Countdown { frames_left: u32 },
    Playing,
    Paused,
    /// Full rows are scored and shown before they are removed.
    LineClearing(LineClear),
    /// Final board on display before returning to the start menu.
    GameOver { frames_left: u32 },
}

impl SessionMode {
    #[must_use]
    pub fn input_context(&self) -> InputContext {
        match self {
            SessionMode::StartMenu => InputContext::StartMenu,
            SessionMode::OptionsMenu { .. } => InputContext::OptionsMenu,
            SessionMode::Playing => InputContext::Playing,
            SessionMode::Paused => InputContext::Paused,
            SessionMode::Countdown { .. }
            | SessionMode::LineClearing(_)
            | SessionMode::GameOver { .. } => InputContext::Inactive,
        }
    }

    /// Returns whether a falling piece is part of the picture.
    #[must_use]
    pub fn shows_falling_piece(&self) -> bool {
        matches!(
            self,
            SessionMode::Countdown { .. }
                | SessionMode::Playing
                | SessionMode::Paused
                | SessionMode::GameOver { .. }
        )
    }
}

/// A running game machine: menus, games and the records kept between them.
///
/// The host calls [`GameSession::step`] once per frame with the buttons held
/// during that frame, then [`GameSession::present`] to draw it. Nothing in
/// the session blocks or keeps time on its own; every duration is counted in
/// steps.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Button, ButtonSet, EngineConfig, GameSession, NullAudio};
///
/// let mut session = GameSession::new(EngineConfig::default());
/// let mut audio = NullAudio;
///
/// // Confirm "start" on the start menu.
/// session.step(ButtonSet::from(Button::Start), &mut audio);
/// assert!(session.mode().is_countdown());
///
/// for _ in 0..210 {
///     session.step(ButtonSet::EMPTY, &mut audio);
/// }
/// assert!(session.mode().is_playing());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    field: GameField,
    progress: GameProgress,
    high_scores: HighScores,
    gravity: GravityTimer,
    input: InputStateMachine,
    mode: SessionMode,
    settings: Settings,
    start_selection: StartMenuItem,
    options_menu: Option<OptionsMenu>,
    secret_unlocked: bool,
    frame: u64,
}

impl GameSession {
    /// Creates a session on the start menu with a random piece sequence.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let queue = PieceQueue::new(config.queue_rerolls);
        Self::with_queue(config, queue)
    }

    /// Like [`Self::new`], but with a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: PieceSeed) -> Self {
        let queue = PieceQueue::with_seed(seed, config.queue_rerolls);
        Self::with_queue(config, queue)
    }

    fn with_queue(config: EngineConfig, queue: PieceQueue) -> Self {
        Self {
            field: GameField::new(queue),
            progress: GameProgress::new(&config.scoring, &config.gravity),
            high_scores: HighScores::from(config.high_scores),
            gravity: GravityTimer::new(),
            input: InputStateMachine::new(config.input),
            mode: SessionMode::StartMenu,
            settings: config.settings,
            start_selection: StartMenuItem::default(),
            options_menu: None,
            secret_unlocked: false,
            frame: 0,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    #[must_use]
    pub fn high_scores(&self) -> HighScores {
        self.high_scores
    }

    #[must_use]
    pub fn gravity_timer(&self) -> &GravityTimer {
        &self.gravity
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn start_selection(&self) -> StartMenuItem {
        self.start_selection
    }

    #[must_use]
    pub fn options_menu(&self) -> Option<&OptionsMenu> {
        self.options_menu.as_ref()
    }

    #[must_use]
    pub fn is_secret_unlocked(&self) -> bool {
        self.secret_unlocked
    }

    /// Number of steps taken since the session was created.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Starts the background music if it is enabled.
    pub fn start_music(&self, audio: &mut dyn Audio) {
        if self.settings.play_music {
            audio.play_music();
        }
    }

    /// Advances the session by one frame.
    pub fn step(&mut self, buttons: ButtonSet, audio: &mut dyn Audio) {
        self.frame += 1;
        let actions = self.input.step(buttons, self.mode.input_context());
        for action in actions {
            self.apply_action(action, audio);
        }
        self.advance_mode(audio);
    }

    /// Pushes the current frame to `renderer`.
    pub fn present<R>(&self, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        renderer.render_board(self.field.board());
        if self.mode.shows_falling_piece() {
            renderer.render_active_piece(self.field.falling_piece());
            if self.settings.show_guides && !self.mode.is_game_over() {
                renderer.render_guide_piece(&self.field.guide());
            }
        }
        renderer.render_held_piece(self.field.held_piece());
        let next = (!self.mode.is_start_menu()).then(|| self.field.queued_piece());
        renderer.render_next_piece(next);
        if let SessionMode::LineClearing(clear) = &self.mode {
            renderer.render_line_clear(clear);
        }
        renderer.render_status(&self.snapshot());
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: &self.mode,
            progress: &self.progress,
            high_scores: self.high_scores,
            settings: &self.settings,
            start_selection: self.start_selection,
            options_menu: self.options_menu.as_ref(),
            rerolls_left: self.field.queue().rerolls_left(),
            secret_unlocked: self.secret_unlocked,
        }
    }

    /// Begins a new game: clears the board and counters and starts the countdown.
    pub fn start_game(&mut self) {
        self.field.reset();
        self.progress.reset(&self.config.gravity);
        self.gravity.reset();
        self.options_menu = None;
        info!(
            queued = ?self.field.queued_piece(),
            interval = self.progress.gravity_interval(),
            "game started"
        );
        let frames_left = self.config.timing.countdown_frames;
        self.mode = if frames_left == 0 {
            SessionMode::Playing
        } else {
            SessionMode::Countdown { frames_left }
        };
    }

    /// Moves the falling piece one row down, optionally restarting the fall timer.
    pub fn move_down(&mut self, reset_timer: bool) {
        self.field.move_down();
        if reset_timer {
            self.gravity.reset();
        }
    }

    /// Rotates the falling piece, trying kicks if enabled. Returns whether it turned.
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        let has_pivot = self.field.falling_piece().pivot().is_some();
        if self
            .field
            .rotate_with_kicks(direction, self.config.allow_kicks)
            .is_none()
        {
            trace!(?direction, "rotation blocked");
            return false;
        }
        if has_pivot {
            self.gravity
                .grant_rotation_grace(self.progress.gravity_interval(), &self.config.lock);
        }
        true
    }

    fn play(&self, audio: &mut dyn Audio, effect: SoundEffect) {
        if self.settings.play_sound_effects {
            audio.play_sound_effect(effect);
        }
    }

    fn apply_action(&mut self, action: Action, audio: &mut dyn Audio) {
        match self.mode {
            SessionMode::StartMenu => self.apply_start_menu_action(action),
            SessionMode::OptionsMenu { origin } => {
                self.apply_options_menu_action(action, origin, audio);
            }
            SessionMode::Playing => self.apply_gameplay_action(action, audio),
            SessionMode::Paused => self.apply_paused_action(action),
            SessionMode::Countdown { .. }
            | SessionMode::LineClearing(_)
            | SessionMode::GameOver { .. } => {}
        }
    }

    fn apply_start_menu_action(&mut self, action: Action) {
        match action {
            Action::MenuUp | Action::MenuDown => {
                self.start_selection = self.start_selection.toggled();
            }
            Action::MenuConfirm => match self.start_selection {
                StartMenuItem::StartGame => self.start_game(),
                StartMenuItem::Options => self.open_options(MenuOrigin::StartMenu),
            },
            Action::UnlockSecretPalette => {
                self.secret_unlocked = true;
                self.settings.palette = Palette::SECRET;
                info!("secret palette unlocked");
            }
            _ => {}
        }
    }

    fn open_options(&mut self, origin: MenuOrigin) {
        self.options_menu = Some(OptionsMenu::new(self.settings, self.secret_unlocked));
        self.mode = SessionMode::OptionsMenu { origin };
    }

    fn close_options(&mut self, origin: MenuOrigin) {
        self.options_menu = None;
        self.mode = match origin {
            MenuOrigin::StartMenu => SessionMode::StartMenu,
            MenuOrigin::Paused => SessionMode::Paused,
        };
    }

    fn apply_options_menu_action(
        &mut self,
        action: Action,
        origin: MenuOrigin,
        audio: &mut dyn Audio,
    ) {
        let Some(menu) = self.options_menu.as_mut() else {
            self.close_options(origin);
            return;
        };
        match action {
            Action::MenuUp | Action::MenuDown => {
                menu.move_highlight(action == Action::MenuDown);
                self.play(audio, SoundEffect::Tick);
            }
            Action::MenuLeft | Action::MenuRight => {
                menu.adjust(action == Action::MenuRight);
                self.play(audio, SoundEffect::Tick);
            }
            Action::MenuConfirm => {
                let music_was_on = self.settings.play_music;
                menu.commit(&mut self.settings);
                info!(settings = ?self.settings, "options saved");
                match (music_was_on, self.settings.play_music) {
                    (true, false) => audio.stop_music(MUSIC_FADE),
                    (false, true) => audio.play_music(),
                    _ => {}
                }
                self.close_options(origin);
            }
            Action::MenuCancel => self.close_options(origin),
            _ => {}
        }
    }

    fn apply_paused_action(&mut self, action: Action) {
        match action {
            Action::TogglePause => {
                debug!("resumed");
                self.mode = SessionMode::Playing;
            }
            Action::OpenOptions => self.open_options(MenuOrigin::Paused),
            Action::Forfeit => self.forfeit(),
            _ => {}
        }
    }

    fn apply_gameplay_action(&mut self, action: Action, audio: &mut dyn Audio) {
        match action {
            Action::Pause | Action::TogglePause => {
                debug!("paused");
                self.mode = SessionMode::Paused;
            }
            Action::Hold => match self.field.swap_with_hold() {
                Ok(_) => self.play(audio, SoundEffect::Hold),
                Err(err) => trace!(%err, "hold ignored"),
            },
            Action::RerollQueue => match self.field.reroll_queue() {
                Some(kind) => debug!(queued = ?kind, "queue rerolled"),
                None => trace!("no rerolls left"),
            },
            Action::Rotate(direction) => {
                self.rotate(direction);
            }
            Action::HardDrop => self.hard_drop(audio),
            Action::SoftDrop { initial_press } => {
                if self.field.try_move_down() {
                    self.move_down(true);
                } else if initial_press {
                    self.gravity.expedite();
                }
            }
            Action::MoveLeft => {
                if self.field.try_move_left() {
                    self.field.move_left();
                }
            }
            Action::MoveRight => {
                if self.field.try_move_right() {
                    self.field.move_right();
                }
            }
            _ => {}
        }
    }

    fn hard_drop(&mut self, audio: &mut dyn Audio) {
        if self.field.try_move_down() {
            self.play(audio, SoundEffect::Drop);
            while self.field.try_move_down() {
                self.move_down(true);
            }
        }
        self.gravity.expedite();
        self.progress.add_hard_drop_bonus();
    }

    fn advance_mode(&mut self, audio: &mut dyn Audio) {
        match &mut self.mode {
            SessionMode::Countdown { frames_left } => {
                *frames_left = frames_left.saturating_sub(1);
                if *frames_left == 0 {
                    self.mode = SessionMode::Playing;
                }
            }
            SessionMode::Playing => self.apply_gravity(audio),
            SessionMode::LineClearing(clear) => {
                clear.frames_left = clear.frames_left.saturating_sub(1);
                if clear.frames_left == 0 {
                    let rows = clear.rows.clone();
                    self.finish_line_clear(&rows, audio);
                }
            }
            SessionMode::GameOver { frames_left } => {
                *frames_left = frames_left.saturating_sub(1);
                if *frames_left == 0 {
                    self.return_to_start_menu();
                }
            }
            SessionMode::StartMenu | SessionMode::OptionsMenu { .. } | SessionMode::Paused => {}
        }
    }

    fn apply_gravity(&mut self, audio: &mut dyn Audio) {
        let grounded = !self.field.try_move_down();
        let tick = self.gravity.advance(
            self.progress.gravity_interval(),
            grounded,
            &self.config.lock,
        );
        match tick {
            GravityTick::Wait => {}
            GravityTick::Fall => self.move_down(false),
            GravityTick::Lock => self.lock_falling_piece(audio),
        }
    }

    fn lock_falling_piece(&mut self, audio: &mut dyn Audio) {
        match self.field.lock_falling_piece() {
            LockOutcome::ToppedOut => self.game_over(audio),
            LockOutcome::Locked { full_rows } if full_rows.is_empty() => {
                debug!(kind = ?self.field.falling_piece().kind(), "piece locked");
                self.check_level_up(audio);
                self.spawn_next_piece();
            }
            LockOutcome::Locked { full_rows } => {
                let count = full_rows.len();
                let points = self.progress.record_line_clear(count);
                debug!(rows = ?full_rows.as_slice(), points, "line clear");
                let effect = if count >= 4 {
                    SoundEffect::LineClearFour
                } else {
                    SoundEffect::LineClear
                };
                self.play(audio, effect);

                let frames_left = self.config.timing.line_clear_frames;
                if frames_left == 0 {
                    self.finish_line_clear(&full_rows, audio);
                } else {
                    self.mode = SessionMode::LineClearing(LineClear {
                        rows: full_rows,
                        frames_left,
                    });
                }
            }
        }
    }

    fn finish_line_clear(&mut self, rows: &[usize], audio: &mut dyn Audio) {
        self.field.clear_rows(rows);
        self.check_level_up(audio);
        self.spawn_next_piece();
        self.mode = SessionMode::Playing;
    }

    fn check_level_up(&mut self, audio: &mut dyn Audio) {
        if let Some(level_up) = self.progress.check_level_up(&self.config.gravity) {
            info!(
                level = level_up.level,
                bonus = level_up.bonus,
                interval = level_up.gravity_interval,
                "level up"
            );
            self.play(audio, SoundEffect::Success);
        }
    }

    fn spawn_next_piece(&mut self) {
        self.field.start_next_piece();
        self.gravity.reset();
    }

    fn record_high_scores(&mut self) {
        let new_record = self.high_scores.update(&self.progress);
        info!(
            score = self.progress.score(),
            level = self.progress.level(),
            lines = self.progress.total_lines(),
            new_record,
            "game over"
        );
    }

    fn game_over(&mut self, audio: &mut dyn Audio) {
        self.play(audio, SoundEffect::GameOver);
        self.record_high_scores();
        let frames_left = self.config.timing.game_over_frames;
        if frames_left == 0 {
            self.return_to_start_menu();
        } else {
            self.mode = SessionMode::GameOver { frames_left };
        }
    }

    fn forfeit(&mut self) {
        self.record_high_scores();
        self.return_to_start_menu();
    }

    fn return_to_start_menu(&mut self) {
        self.field.reset();
        self.progress.reset(&self.config.gravity);
        self.gravity.reset();
        self.start_selection = StartMenuItem::default();
        self.secret_unlocked = false;
        self.mode = SessionMode::StartMenu;
    }
}
