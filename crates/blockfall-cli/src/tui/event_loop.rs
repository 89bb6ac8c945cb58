use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces frame, render and terminal events.
///
/// Frame events are spaced by a fixed interval. When the loop falls behind,
/// the next frame is scheduled from the deadline that was missed, not from
/// the current time, so the average rate holds; after a long stall it gives
/// up catching up and restarts from now.
#[derive(Debug)]
pub(super) struct EventLoop {
    frame_interval: Option<Duration>,
    next_frame: Instant,
    dirty: bool,
}

/// Frames the loop may fall behind before dropping them.
const MAX_FRAME_BACKLOG: u32 = 5;

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            frame_interval: None,
            next_frame: Instant::now(),
            dirty: true,
        }
    }

    /// Pass `None` to stop frame events.
    pub(super) fn set_frame_interval(&mut self, interval: Option<Duration>) {
        self.frame_interval = interval;
        self.next_frame = Instant::now();
    }

    /// Blocks until a frame is due, a redraw is needed, or a terminal event arrives.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.frame_interval
                && now >= self.next_frame
            {
                let behind = now.duration_since(self.next_frame);
                self.next_frame = if behind > interval * MAX_FRAME_BACKLOG {
                    now + interval
                } else {
                    self.next_frame + interval
                };
                self.dirty = true;
                return Ok(TuiEvent::Frame);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self
                .frame_interval
                .map(|_| self.next_frame.saturating_duration_since(now));
            if let Some(timeout) = timeout
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
