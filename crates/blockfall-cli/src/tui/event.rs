use crossterm::event::Event as CrosstermEvent;

/// Next thing the runtime has to do.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// A frame period has elapsed.
    Frame,
    /// Something changed since the last draw.
    Render,
    Crossterm(CrosstermEvent),
}
