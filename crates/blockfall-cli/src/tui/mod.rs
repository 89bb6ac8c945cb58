//! Fixed-rate terminal runtime.
//!
//! [`Tui::run`] owns the terminal and drives an [`App`]: it feeds terminal
//! events as they arrive, asks the app to advance one frame at the configured
//! frame rate, and redraws after anything changed.

mod app;
mod event;
mod event_loop;
mod runner;

pub(crate) use self::{app::App, runner::Tui};
