use std::{io, time::Duration};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use tracing::{debug, warn};

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal runtime.
#[derive(Default, Debug)]
pub(crate) struct Tui {
    events: EventLoop,
}

impl Tui {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the number of frames per second.
    pub(crate) fn set_frame_rate(&mut self, rate: f64) {
        self.events
            .set_frame_interval(Some(Duration::from_secs_f64(1.0 / rate)));
    }

    /// Runs `app` until it asks to exit.
    ///
    /// Key release reporting is switched on for the duration of the run when
    /// the terminal supports it.
    pub(crate) fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            let enhanced = enable_key_release_events();
            let result = self.run_loop(app, terminal);
            if enhanced && let Err(err) = execute!(io::stdout(), PopKeyboardEnhancementFlags) {
                warn!(%err, "failed to restore keyboard mode");
            }
            result
        })
    }

    fn run_loop<A>(
        &mut self,
        app: &mut A,
        terminal: &mut ratatui::DefaultTerminal,
    ) -> anyhow::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Frame => app.update(self),
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => app.handle_event(self, event),
            }
        }
        Ok(())
    }
}

fn enable_key_release_events() -> bool {
    match terminal::supports_keyboard_enhancement() {
        Ok(true) => {}
        Ok(false) => {
            debug!("terminal does not report key releases, using release timeout");
            return false;
        }
        Err(err) => {
            warn!(%err, "failed to query keyboard enhancement support");
            return false;
        }
    }
    let flags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
    match execute!(io::stdout(), PushKeyboardEnhancementFlags(flags)) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "failed to enable key release events");
            false
        }
    }
}
