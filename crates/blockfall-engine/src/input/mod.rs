//! Per-frame input handling.
//!
//! The host reports which logical [`Button`]s are down each frame as a
//! [`ButtonSet`]. [`InputStateMachine`] turns that level signal into edge and
//! auto-repeat triggers and maps them to [`Action`]s according to the mode the
//! session is in.

pub use self::{button::*, repeat::*, secret_code::*, state_machine::*};

mod button;
mod repeat;
mod secret_code;
mod state_machine;
