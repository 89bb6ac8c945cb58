use std::time::Instant;

use blockfall_engine::GameSession;
use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use tracing::info;

use crate::{
    audio::LoggedAudio,
    keyboard::Keyboard,
    tui::{App, Tui},
    view::SessionView,
};

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    keyboard: Keyboard,
    audio: LoggedAudio,
    fps: u32,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(session: GameSession, fps: u32) -> Self {
        Self {
            session,
            keyboard: Keyboard::new(),
            audio: LoggedAudio::default(),
            fps,
            is_exiting: false,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(f64::from(self.fps));
        self.session.start_music(&mut self.audio);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        let input = self.keyboard.handle_key(&key, Instant::now());
        if input.is_quit() && key.kind != KeyEventKind::Release {
            info!(frame = self.session.frame(), "quit requested");
            self.is_exiting = true;
        }
    }

    fn update(&mut self, _tui: &mut Tui) {
        let buttons = self.keyboard.buttons(Instant::now());
        self.session.step(buttons, &mut self.audio);
    }

    fn draw(&self, frame: &mut Frame) {
        let view = SessionView::new(&self.session).music(self.audio.is_music_playing());
        frame.render_widget(view, frame.area());
    }
}
