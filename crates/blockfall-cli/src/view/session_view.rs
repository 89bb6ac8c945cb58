use blockfall_engine::{GameSession, SessionMode};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::{
    FrameModel, StatusModel, color, style,
    widgets::{BoardDisplay, MenuDisplay, PieceDisplay, StatusDisplay},
};

/// Whole-screen view of a session.
#[derive(Debug)]
pub(crate) struct SessionView {
    model: FrameModel,
    countdown_frames: u32,
    line_clear_frames: u32,
    music: bool,
}

impl SessionView {
    pub(crate) fn new(session: &GameSession) -> Self {
        let timing = session.config().timing;
        Self {
            model: FrameModel::capture(session),
            countdown_frames: timing.countdown_frames,
            line_clear_frames: timing.line_clear_frames,
            music: false,
        }
    }

    pub(crate) fn music(self, music: bool) -> Self {
        Self { music, ..self }
    }

    /// Number shown during the countdown, 3 down to 1.
    fn countdown_number(&self, frames_left: u32) -> u32 {
        (frames_left * 3).div_ceil(self.countdown_frames.max(1)).clamp(1, 3)
    }

    fn help_text(mode: &SessionMode) -> &'static str {
        match mode {
            SessionMode::StartMenu => "↑ ↓ (Select) | Enter (Confirm) | Q (Quit)",
            SessionMode::OptionsMenu { .. } => {
                "↑ ↓ (Select) | ← → (Change) | Enter (Save) | Esc (Cancel) | Q (Quit)"
            }
            SessionMode::Playing => {
                "← → (Move) | ↓ (Soft) | ↑ (Hard) | Z C (Rotate) | A (Hold) | S (Reroll) | Enter/Esc (Pause)"
            }
            SessionMode::Paused => "Enter (Resume) | Esc (Options) | A+S (Forfeit) | Q (Quit)",
            SessionMode::Countdown { .. }
            | SessionMode::LineClearing(_)
            | SessionMode::GameOver { .. } => "Q (Quit)",
        }
    }

    fn popup(&self, status: &StatusModel) -> Option<Popup<'_>> {
        let popup = match &status.mode {
            SessionMode::StartMenu => Popup::Menu(
                "BLOCKFALL",
                MenuDisplay::start(status.start_selection, status.secret_unlocked),
            ),
            SessionMode::OptionsMenu { .. } => {
                let menu = status.options_menu.as_ref()?;
                Popup::Menu("OPTIONS", MenuDisplay::options(menu))
            }
            SessionMode::Countdown { frames_left } => Popup::Banner(
                format!("READY {}", self.countdown_number(*frames_left)),
                Style::new().fg(color::BLACK).bg(color::CYAN),
            ),
            SessionMode::Paused => Popup::Banner(
                "PAUSED".to_owned(),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            ),
            SessionMode::GameOver { .. } => Popup::Banner(
                "GAME OVER!!".to_owned(),
                Style::new().fg(color::WHITE).bg(color::RED),
            ),
            SessionMode::Playing | SessionMode::LineClearing(_) => return None,
        };
        Some(popup)
    }
}

enum Popup<'a> {
    Menu(&'static str, MenuDisplay<'a>),
    Banner(String, Style),
}

fn border_color(mode: &SessionMode) -> Color {
    match mode {
        SessionMode::Playing | SessionMode::LineClearing(_) | SessionMode::Countdown { .. } => {
            color::WHITE
        }
        SessionMode::Paused | SessionMode::OptionsMenu { .. } => color::YELLOW,
        SessionMode::GameOver { .. } => color::RED,
        SessionMode::StartMenu => color::GRAY,
    }
}

impl Widget for SessionView {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionView {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let Some(status) = &self.model.status else {
            return;
        };
        let settings = self.model.settings();
        let border_style = border_color(&status.mode);
        let block_padding = Padding::symmetric(1, 0);
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board =
            BoardDisplay::new(&self.model.board, settings.palette, settings.default_theme)
                .falling_piece(self.model.active)
                .guide(self.model.guide)
                .line_clear(self.model.line_clear.as_ref(), self.line_clear_frames)
                .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let hold_panel = PieceDisplay::new(self.model.held, settings.palette).block(panel("HOLD"));
        let next_panel = PieceDisplay::new(self.model.next, settings.palette).block(panel("NEXT"));
        let status_panel = StatusDisplay::new(status).block(panel("STATUS"));

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(game_board.height()), Constraint::Length(1)])
                .areas(area);

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), status_panel.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let [hold_area, status_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(status_panel.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        status_panel.render(status_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let help = SessionView::help_text(&status.mode);
        let help = if self.music {
            format!("♪ {help}")
        } else {
            help.to_owned()
        };
        Text::from(help)
            .style(Style::default().fg(color::GRAY))
            .centered()
            .render(help_area, buf);

        match self.popup(status) {
            None => {}
            Some(Popup::Banner(text, style)) => {
                let block = Block::new().style(style);
                let area =
                    board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
                let inner = block.inner(area);
                Clear.render(area, buf);
                block.render(area, buf);
                Text::styled(text, style)
                    .centered()
                    .render(inner.centered_vertically(Constraint::Length(1)), buf);
            }
            Some(Popup::Menu(title, menu)) => {
                let menu = menu.block(
                    Block::bordered()
                        .title(Line::from(title).centered())
                        .border_style(border_style)
                        .style(style::DEFAULT),
                );
                let title_width = u16::try_from(title.len() + 4).unwrap_or(u16::MAX);
                let area = board_area.centered(
                    Constraint::Length(menu.width().max(title_width).min(board_width)),
                    Constraint::Length(menu.height()),
                );
                Clear.render(area, buf);
                menu.render(area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Button, ButtonSet, EngineConfig, NullAudio, PieceSeed};

    use super::*;

    fn render(session: &GameSession) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SessionView::new(session).render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn session() -> GameSession {
        GameSession::with_seed(EngineConfig::default(), PieceSeed::from_bytes([1; 16]))
    }

    #[test]
    fn test_start_menu_shows_title() {
        let screen = render(&session());
        assert!(screen.contains("BLOCKFALL"));
        assert!(screen.contains("START"));
        assert!(screen.contains("OPTIONS"));
    }

    #[test]
    fn test_countdown_banner() {
        let mut session = session();
        session.step(ButtonSet::from(Button::Start), &mut NullAudio);
        let screen = render(&session);
        assert!(screen.contains("READY 3"));
        assert!(screen.contains("HOLD"));
        assert!(screen.contains("SCORE:"));
    }

    #[test]
    fn test_countdown_number_counts_down() {
        let view = SessionView::new(&session());
        assert_eq!(view.countdown_number(210), 3);
        assert_eq!(view.countdown_number(140), 2);
        assert_eq!(view.countdown_number(70), 1);
        assert_eq!(view.countdown_number(1), 1);
    }
}
