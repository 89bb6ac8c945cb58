use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Application driven by [`Tui::run`].
pub(crate) trait App {
    /// Called once before the first frame. Configure the frame rate here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key, resize, focus).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Advances the game by one frame.
    fn update(&mut self, tui: &mut Tui);

    fn draw(&self, frame: &mut Frame);
}
